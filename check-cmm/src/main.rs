//! check_cmm - monitoring plugin entry point
//!
//! Prints exactly one status line and exits with 0 (OK), 1 (WARNING),
//! 2 (CRITICAL) or 3 (UNKNOWN).

use check_cmm::cli::{self, Command, USAGE};
use check_cmm::{logging, run_check, NetSnmpClient, ProbeConfig, Report, Severity, SystemPing};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let default_name = check_cmm::config::ReportConfig::default().check_name;

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            println!("{}", USAGE);
            std::process::exit(Severity::Unknown.exit_code());
        }
        Ok(Command::Run(args)) => args,
        Err(e) => finish(&default_name, Report::unknown(e.with_usage())),
    };

    let _log_guard = logging::init(args.verbose);

    let config = match ProbeConfig::load(args.config.as_deref()).await {
        Ok(config) => config.with_community(args.community.clone()),
        Err(e) => finish(&default_name, Report::unknown(format!("{:#}", e))),
    };
    debug!("Effective config: {:?}", config);

    let pinger = SystemPing::new(&config.ping);
    let snmp = NetSnmpClient::new(&args.host, &config.snmp.community, &config.snmp);

    let report = run_check(&args.host, &pinger, &snmp).await;
    finish(&config.report.check_name, report)
}

fn finish(check_name: &str, report: Report) -> ! {
    println!("{}", report.render(check_name));
    std::process::exit(report.exit_code())
}
