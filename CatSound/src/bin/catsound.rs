fn main() -> anyhow::Result<()> {
    catsound::cli::run_cli()
}
