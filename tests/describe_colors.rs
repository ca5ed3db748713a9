use webutilbox::{describe_colors, Arguments, CLIParser, Error};

fn run(arguments: Vec<&str>) -> webutilbox::Result<String> {
    let mut cli_parser = CLIParser::new();
    let mut all_arguments = vec!["test", "color"];
    all_arguments.extend(arguments);
    match cli_parser.parse(all_arguments) {
        Arguments::Color(arguments) => describe_colors(&arguments),
        Arguments::Convert(_) => panic!("color subcommand not recognized"),
    }
}

#[test]
fn test_describe_single_color() {
    let description = run(vec!["3b82f6"]).expect("Conversion failed");
    assert_eq!(description, "#3B82F6\nrgb(59, 130, 246)\nhsl(217, 91%, 60%)");
}

#[test]
fn test_describe_multiple_colors() {
    let description = run(vec!["#000000", "#FFFFFF"]).expect("Conversion failed");
    assert_eq!(
        description,
        "#000000\nrgb(0, 0, 0)\nhsl(0, 0%, 0%)\n\n#FFFFFF\nrgb(255, 255, 255)\nhsl(0, 0%, 100%)"
    );
}

#[test]
fn test_describe_presets() {
    let description = run(vec!["--presets"]).expect("Conversion failed");
    assert_eq!(description.split("\n\n").count(), 10);
    assert!(description.starts_with("#FF6B6B\nrgb(255, 107, 107)\n"));
}

#[test]
fn test_describe_invalid_color() {
    let result = run(vec!["#FF0000", "#ABC"]);
    match result {
        Err(Error::InvalidColorFormat(input)) => assert_eq!(input, "#ABC"),
        other => panic!("Invalid color not rejected: {:?}", other.map(|_| ())),
    }
}
