mod command;
mod record;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
