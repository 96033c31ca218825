fn main() -> anyhow::Result<()> {
    cfgmeta::cli::run()
}
