use std::env::args_os;
use std::process::ExitCode;

use webutilbox::{convert_images, describe_colors, Arguments, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match &arguments {
        Arguments::Color(arguments) => match describe_colors(arguments) {
            Ok(description) => {
                println!("{}", description);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Conversion failed because of: {}", e);
                ExitCode::FAILURE
            }
        },
        Arguments::Convert(arguments) => match convert_images(arguments) {
            Ok(summary) => {
                println!(
                    "{} of {} image(s) converted successfully",
                    summary.completed, summary.total
                );
                if summary.failed > 0 {
                    eprintln!("{} image(s) failed to convert", summary.failed);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Conversion failed because of: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
