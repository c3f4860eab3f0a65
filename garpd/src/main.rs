use clap::{App, Arg, ArgMatches};
use garpd::{AnnounceConfig, Error};
use std::convert::Infallible;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Collect arguments from user
    let matches = app().get_matches();

    let err = match run(&matches) {
        Ok(never) => match never {},
        Err(err) => err,
    };
    error!(
        interface = matches.value_of("interface").unwrap_or_default(),
        address = matches.value_of("address").unwrap_or_default(),
        "{}",
        err
    );
    process::exit(err.exit_code());
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("garpd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Periodically broadcast a gratuitous ARP reply for an IPv4 address")
        .arg(
            Arg::with_name("interface")
                .value_name("INTERFACE")
                .help("Interface to announce on")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("address")
                .value_name("IPV4")
                .help("Address to announce, in dotted-quad form")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("interval")
                .short("i")
                .long("interval")
                .value_name("SECONDS")
                .help("Seconds between announcements [default: 1]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("pad")
                .short("p")
                .long("pad")
                .help("Pad frames to the 60-byte Ethernet minimum"),
        )
}

fn config(matches: &ArgMatches) -> Result<AnnounceConfig, Error> {
    let config = AnnounceConfig::parse(
        matches.value_of("interface").unwrap_or_default(),
        matches.value_of("address").unwrap_or_default(),
        matches.value_of("interval"),
    )?;
    Ok(config.with_padding(matches.is_present("pad")))
}

#[cfg(target_os = "linux")]
fn run(matches: &ArgMatches) -> Result<Infallible, Error> {
    use garpd::{AfPacketTransmitter, Announcer, SystemClock, SystemResolver};

    let config = config(matches)?;
    Announcer::new(config, SystemResolver, AfPacketTransmitter, SystemClock).run()
}

#[cfg(not(target_os = "linux"))]
fn run(matches: &ArgMatches) -> Result<Infallible, Error> {
    config(matches)?;
    Err(Error::Configuration(
        "link-layer sockets are only available on Linux".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_positionals_are_required() {
        for args in &[
            &["garpd"][..],
            &["garpd", "eth0"][..],
            &["garpd", "eth0", "192.0.2.10", "extra"][..],
        ] {
            assert!(app().get_matches_from_safe(*args).is_err(), "{:?}", args);
        }
    }

    #[test]
    fn options_parse() {
        let matches = app()
            .get_matches_from_safe(&["garpd", "eth0", "192.0.2.10", "--interval", "5", "--pad"])
            .unwrap();
        assert_eq!(matches.value_of("interface"), Some("eth0"));
        assert_eq!(matches.value_of("address"), Some("192.0.2.10"));

        let config = config(&matches).unwrap();
        assert_eq!(config.interval(), std::time::Duration::from_secs(5));
        assert!(config.pad());
    }

    #[test]
    fn bad_address_is_a_configuration_error() {
        let matches = app().get_matches_from_safe(&["garpd", "eth0", "1.2.3"]).unwrap();
        assert_eq!(config(&matches).unwrap_err().exit_code(), 1);
    }
}
