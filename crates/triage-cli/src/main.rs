fn main() -> anyhow::Result<()> {
    triage_cli::cli::run()
}
