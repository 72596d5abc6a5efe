use optbind::prelude::*;
use optbind::{
    CommandLineParser, ErrorMessage, OptionSpec, ParsedArguments, Schema, ValidationError,
};

struct Install {
    package: String,
    target: Option<String>,
    retries: u32,
    verbose: bool,
}

impl Request for Install {
    fn schema() -> Schema {
        Schema::new()
            .add(
                OptionSpec::new("t")
                    .takes_value()
                    .meta("DIR")
                    .help("Install into DIR instead of the working directory."),
            )
            .add(
                OptionSpec::new("retries")
                    .takes_value()
                    .meta("N")
                    .help("How many times to retry a failed download."),
            )
            .add(OptionSpec::new("verbose").help("Print each step."))
            .add(OptionSpec::positional(0).required().help("package"))
    }

    fn bind(arguments: &ParsedArguments) -> Result<Self, ValidationError> {
        Ok(Install {
            package: arguments.parse("argv.0")?.unwrap_or_default(),
            target: arguments.parse("t")?,
            retries: arguments.parse("retries")?.unwrap_or(3),
            verbose: arguments.flag("verbose"),
        })
    }
}

fn install(request: Install) -> Result<(), ErrorMessage> {
    if request.package.starts_with('.') {
        let package = request.package.clone();
        return Err(ErrorMessage::rendered(move |ui| {
            ui.print_error(format!("Could not install '{package}'."));
            ui.print_error("Package names must not begin with '.'.".to_string());
        }));
    }

    let target = request.target.as_deref().unwrap_or(".");
    if request.verbose {
        println!("Retrying up to {} times.", request.retries);
    }
    println!("Installed '{}' into '{target}'.", request.package);
    Ok(())
}

fn main() {
    let parser = CommandLineParser::for_request::<Install>("install")
        .about("Installs a package.")
        .build();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    let exit_code = parser.run(&tokens, |parsed| {
        let request = Install::bind(&parsed).map_err(|e| ErrorMessage::plain(e.to_string()))?;
        install(request)
    });

    std::process::exit(exit_code);
}
