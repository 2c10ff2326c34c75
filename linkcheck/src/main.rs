use commands::command_argument_builder;
use linkcheck::CLAP_STYLING;
use linkcheck::handlers::{handle_check, handle_classify, handle_format, init_tracing};

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    init_tracing(verbose);

    match chosen_command.subcommand() {
        Some(("check", primary_command)) => handle_check(primary_command, quiet).await,
        Some(("format", primary_command)) => handle_format(primary_command),
        Some(("classify", primary_command)) => handle_classify(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
