use optbind::{CommandLineParser, OptionSpec};

fn main() {
    let parser = CommandLineParser::new("bin/demo")
        .about("Demo app")
        .add(
            OptionSpec::new("bar2")
                .takes_value()
                .required()
                .group("main")
                .help("Set the bar option."),
        )
        .add(
            OptionSpec::new("o")
                .takes_value()
                .required()
                .group("main")
                .meta("WOW_LEVEL")
                .help("For the wow."),
        )
        .group("main")
        .build();

    let parsed = parser.parse();
    let bar2 = parsed.value("bar2").unwrap_or_default();
    let wow = parsed.value("o").unwrap_or_default();
    println!("bar2: {bar2}, wow level: {wow}");
}
