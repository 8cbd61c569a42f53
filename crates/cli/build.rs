use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("serialbook")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Serialbook Contributors")
        .about("Bind a serialized web novel into a single numbered book")
        .arg(
            clap::arg!(--profile <FILE> "Site profile (JSON)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--base_url <URL> "Listing page that links to every chapter")
                .long("base-url")
                .value_name("URL"),
        )
        .arg(clap::arg!(--novel <SLUG> "Path segment identifying the novel's chapter pages").value_name("SLUG"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (pdf, text)")
                .value_name("FORMAT")
                .default_value("pdf")
                .value_parser(["pdf", "text"]),
        )
        .arg(clap::arg!(--timeout <SECS> "Chapter request timeout in seconds").default_value("20"))
        .arg(
            clap::arg!(--listing_timeout <SECS> "Listing request timeout in seconds")
                .long("listing-timeout")
                .default_value("5"),
        )
        .arg(
            clap::arg!(--delay_ms <MS> "Pause between chapter requests in milliseconds")
                .long("delay-ms")
                .default_value("100"),
        )
        .arg(
            clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests")
                .long("user-agent")
                .value_name("UA"),
        )
        .arg(
            clap::arg!(--deny <KEYWORD> "Extra boilerplate keyword to drop")
                .value_name("KEYWORD")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::arg!(--denylist <FILE> "Replace the boilerplate keywords with the ones in FILE")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--title <TEXT> "Book title on the title page").value_name("TEXT"))
        .arg(clap::arg!(--subtitle <TEXT> "Subtitle on the title page").value_name("TEXT"))
        .arg(clap::arg!(--print_profile "Print the effective site profile as JSON and exit").long("print-profile"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "serialbook", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "serialbook", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "serialbook", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "serialbook", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
