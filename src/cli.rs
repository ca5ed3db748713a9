use crate::archive::DEFAULT_ARCHIVE_NAME;
use crate::image::{Quality, TargetFormat, DEFAULT_QUALITY};
use crate::{Arguments, ColorArguments, ConvertArguments, ConvertOutput};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const COLOR_SUBCOMMAND: &str = "color";
const CONVERT_SUBCOMMAND: &str = "convert";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_subcommands(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_subcommands(command: Command) -> Command {
        command
            .subcommand(Self::create_color_subcommand())
            .subcommand(Self::create_convert_subcommand())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    fn create_color_subcommand() -> Command {
        let command = Command::new(COLOR_SUBCOMMAND).about("Convert hex colors to RGB and HSL");
        let command = Self::register_color_values_argument(command);
        Self::register_presets_argument(command)
    }

    fn create_convert_subcommand() -> Command {
        let command = Command::new(CONVERT_SUBCOMMAND)
            .about("Convert images to another format and package the results");
        let command = Self::register_input_files_argument(command);
        let command = Self::register_format_argument(command);
        let command = Self::register_quality_argument(command);
        let command = Self::register_output_argument(command);
        Self::register_output_dir_argument(command)
    }

    fn register_color_values_argument(command: Command) -> Command {
        command.arg(Self::create_color_values_argument())
    }

    fn register_presets_argument(command: Command) -> Command {
        command.arg(Self::create_presets_argument())
    }

    fn register_input_files_argument(command: Command) -> Command {
        command.arg(Self::create_input_files_argument())
    }

    fn register_format_argument(command: Command) -> Command {
        command.arg(Self::create_format_argument())
    }

    fn register_quality_argument(command: Command) -> Command {
        command.arg(Self::create_quality_argument())
    }

    fn register_output_argument(command: Command) -> Command {
        command.arg(Self::create_output_argument())
    }

    fn register_output_dir_argument(command: Command) -> Command {
        command.arg(Self::create_output_dir_argument())
    }

    fn create_color_values_argument() -> Arg {
        Arg::new("values")
            .help("Hex colors, e.g. #3B82F6 or 3b82f6")
            .num_args(1..)
            .required_unless_present("presets")
    }

    fn create_presets_argument() -> Arg {
        arg!(presets: --presets "Convert the preset swatches as well")
    }

    fn create_input_files_argument() -> Arg {
        Arg::new("input_files")
            .help("Paths to the images to convert")
            .value_parser(value_parser!(PathBuf))
            .num_args(1..)
            .required(true)
    }

    fn create_format_argument() -> Arg {
        arg!(format: -f --format <FORMAT> "Output format")
            .default_value("png")
            .value_parser(value_parser!(TargetFormat))
    }

    fn create_quality_argument() -> Arg {
        arg!(quality: -q --quality <QUALITY> "Quality in percent, lossy formats only")
            .default_value(DEFAULT_QUALITY.to_string())
            .value_parser(value_parser!(u8).range(0..=100))
    }

    fn create_output_argument() -> Arg {
        arg!(output: -o --output <ARCHIVE> "Path of the ZIP archive to write")
            .default_value(DEFAULT_ARCHIVE_NAME)
            .value_parser(value_parser!(PathBuf))
            .conflicts_with("output_dir")
    }

    fn create_output_dir_argument() -> Arg {
        arg!(output_dir: -d --output_dir <DIR> "Write each image into this directory instead of an archive")
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        match matches.subcommand() {
            Some((COLOR_SUBCOMMAND, matches)) => {
                Arguments::Color(Self::extract_color_arguments(matches))
            }
            Some((CONVERT_SUBCOMMAND, matches)) => {
                Arguments::Convert(Self::extract_convert_arguments(matches))
            }
            _ => unreachable!("A subcommand is required"),
        }
    }

    fn extract_color_arguments(matches: &ArgMatches) -> ColorArguments {
        ColorArguments {
            values: Self::extract_color_values_argument(matches),
            presets: Self::extract_presets_argument(matches),
        }
    }

    fn extract_convert_arguments(matches: &ArgMatches) -> ConvertArguments {
        ConvertArguments {
            input_files: Self::extract_input_files_argument(matches),
            format: Self::extract_format_argument(matches),
            quality: Self::extract_quality_argument(matches),
            output: Self::extract_output_argument(matches),
        }
    }

    fn extract_color_values_argument(matches: &ArgMatches) -> Vec<String> {
        matches
            .get_many::<String>("values")
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }

    fn extract_presets_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("presets")
    }

    fn extract_input_files_argument(matches: &ArgMatches) -> Vec<PathBuf> {
        matches
            .get_many::<PathBuf>("input_files")
            .expect("Required argument input_files not provided")
            .cloned()
            .collect()
    }

    fn extract_format_argument(matches: &ArgMatches) -> TargetFormat {
        matches
            .get_one::<TargetFormat>("format")
            .expect("Output format must be provided, but was unset.")
            .to_owned()
    }

    fn extract_quality_argument(matches: &ArgMatches) -> Quality {
        let percent = matches
            .get_one::<u8>("quality")
            .expect("Quality must be provided, but was unset.");
        Quality::new(*percent)
    }

    fn extract_output_argument(matches: &ArgMatches) -> ConvertOutput {
        if let Some(directory) = matches.get_one::<PathBuf>("output_dir") {
            return ConvertOutput::Directory(directory.clone());
        }
        let archive = matches
            .get_one::<PathBuf>("output")
            .expect("Output archive must be provided, but was unset.");
        ConvertOutput::Archive(archive.clone())
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
