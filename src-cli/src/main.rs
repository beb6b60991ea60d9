fn main() -> anyhow::Result<()> {
    vireo_cli_lib::run()
}
