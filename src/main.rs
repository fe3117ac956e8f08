use colored::Colorize;

fn main() {
    pojo_synth::init_tracing();
    if let Err(error) = pojo_synth::cli::CommandLineInterface::load().run() {
        eprintln!("{} {}", "error:".red().bold(), format!("{error:#}").red());
        std::process::exit(1);
    }
}
