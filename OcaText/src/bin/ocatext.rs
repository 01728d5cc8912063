fn main() -> anyhow::Result<()> {
    ocatext::cli::run_cli()
}
