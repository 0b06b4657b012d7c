fn main() -> anyhow::Result<()> {
    imagediff::cli::run_cli()
}
