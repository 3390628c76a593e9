fn main() -> anyhow::Result<()> {
    vox_installer::app::run()
}
