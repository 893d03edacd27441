mod command;
mod input;
mod output;
mod report;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    command::run()
}
