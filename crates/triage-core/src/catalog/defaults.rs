//! Default vocabularies used by the emergency department forms.

pub(super) const SYMPTOMS: &[&str] = &[
    "Dolor de cabeza",
    "Fiebre",
    "Náuseas",
    "Vómitos",
    "Diarrea",
    "Dolor abdominal",
    "Dolor torácico",
    "Disnea",
    "Tos",
    "Fatiga",
    "Debilidad",
    "Mareo",
    "Síncope",
    "Sudoración",
    "Palpitaciones",
    "Temblor",
    "Rigidez",
    "Confusión",
    "Visión borrosa",
    "Dolor lumbar",
    "Dolor articular",
    "Edema",
    "Prurito",
    "Erupción cutánea",
    "Hemoptisis",
    "Melena",
    "Hematuria",
    "Disuria",
    "Poliuria",
    "Hiporexia",
];

pub(super) const DIAGNOSES: &[&str] = &[
    "Síndrome Coronario Agudo",
    "Infarto Agudo de Miocardio",
    "Angina Inestable",
    "Pericarditis Aguda",
    "Miocarditis",
    "Embolia Pulmonar",
    "Neumonía",
    "Neumotórax",
    "Disección Aórtica",
    "Insuficiencia Cardíaca Aguda",
    "Crisis Hipertensiva",
    "Reflujo Gastroesofágico",
    "Espasmo Esofágico",
    "Síndrome de Hiperventilación",
    "Ansiedad",
    "Crisis de Pánico",
    "Dolor Musculoesquelético",
    "Herpes Zoster",
    "Costocondritis",
];

/// (name, unit, reference range)
pub(super) const LAB_TESTS: &[(&str, &str, &str)] = &[
    ("Hemoglobina", "g/dL", "12-16"),
    ("Hematocrito", "%", "37-47"),
    ("Leucocitos", "K/μL", "4.5-11.0"),
    ("Plaquetas", "K/μL", "150-450"),
    ("Glucosa", "mg/dL", "70-100"),
    ("Creatinina", "mg/dL", "0.6-1.2"),
    ("Urea", "mg/dL", "15-40"),
    ("Sodio", "mEq/L", "135-145"),
    ("Potasio", "mEq/L", "3.5-5.0"),
    ("Cloro", "mEq/L", "98-107"),
    ("AST/TGO", "U/L", "5-40"),
    ("ALT/TGP", "U/L", "7-56"),
    ("Bilirrubina Total", "mg/dL", "0.3-1.0"),
    ("Proteína C Reactiva", "mg/L", "< 5"),
    ("Troponina I", "ng/mL", "< 0.04"),
];
