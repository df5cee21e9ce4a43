fn main() -> anyhow::Result<()> {
    picton::cli::main()
}
