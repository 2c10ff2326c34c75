use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkcheck")
        .about("Check external links in generated HTML and report the broken ones")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress progress and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Enable debug logging on stderr")
                .required(false)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand_required(true)
        .subcommand(
            command!("check")
                .about(
                    "Check every external link in one or more HTML files and emit a JSON \
                report of broken and redirected links.",
                )
                .arg(
                    arg!(<FILE> ...)
                        .required(true)
                        .help("HTML files to scan for external links")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("30"),
                )
                .arg(
                    arg!(--"max-redirects" <NUM>)
                        .required(false)
                        .help("Maximum number of redirects to follow per link")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(--"silent-codes" <CODES>)
                        .required(false)
                        .help("Comma-separated status codes that are never reported as broken")
                        .default_value("403,503"),
                )
                .arg(
                    arg!(--"delay-ms" <MILLISECONDS>)
                        .required(false)
                        .help("Pause between consecutive requests")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("100"),
                )
                .arg(
                    arg!(--"ai-suggestions")
                        .required(false)
                        .help("Suggest replacement URLs for broken and redirected links")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"bot-domain" <DOMAIN>)
                        .required(false)
                        .help("Extra domain whose failures are treated as bot blocking (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"trusted-domain" <DOMAIN>)
                        .required(false)
                        .help("Extra domain whose connection errors are ignored (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: print to stdout)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: json, text")
                        .value_parser(["json", "text"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            command!("format")
                .about("Render one section of a JSON report as text for workflow comments")
                .arg(
                    arg!(<MODE>)
                        .required(true)
                        .help("Section to render")
                        .value_parser(["broken", "redirect", "ai"]),
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Read the JSON report from a file (default: stdin)"),
                ),
        )
        .subcommand(
            command!("classify")
                .about("Decide whether a failed link looks bot-blocked rather than broken")
                .arg(arg!(<URL>).required(true).help("The link that failed"))
                .arg(
                    arg!(-s --"status" <CODE>)
                        .required(false)
                        .help("HTTP status code returned for the link")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    arg!(-e --"error" <TEXT>)
                        .required(false)
                        .help("Error text recorded for the request"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        command_argument_builder().debug_assert();
    }

    #[test]
    fn test_check_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["linkcheck", "check", "index.html"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "check");
        assert_eq!(sub.get_one::<u64>("timeout"), Some(&30));
        assert_eq!(sub.get_one::<usize>("max-redirects"), Some(&5));
        assert_eq!(sub.get_one::<String>("silent-codes").map(String::as_str), Some("403,503"));
        assert_eq!(sub.get_one::<u64>("delay-ms"), Some(&100));
        assert!(!sub.get_flag("ai-suggestions"));
    }

    #[test]
    fn test_repeatable_domains() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "linkcheck",
                "check",
                "a.html",
                "b.html",
                "--bot-domain",
                "one.example",
                "--bot-domain",
                "two.example",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        let files: Vec<&String> = sub.get_many::<String>("FILE").unwrap().collect();
        assert_eq!(files.len(), 2);
        let domains: Vec<&String> = sub.get_many::<String>("bot-domain").unwrap().collect();
        assert_eq!(domains, vec!["one.example", "two.example"]);
    }

    #[test]
    fn test_format_rejects_unknown_mode() {
        let result = command_argument_builder().try_get_matches_from(["linkcheck", "format", "all"]);
        assert!(result.is_err());
    }
}
