use std::{env, path::PathBuf, process::ExitCode};

use colored::Colorize;
use pocket_ledger::{
    build_info, config::ConfigManager, init_with_filter, report::Overview, LedgerSession,
};

const USAGE: &str = "usage: pocket_ledger_report [--json] [--data <dir>] [--version]";

struct Options {
    json: bool,
    data_root: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Options>, String> {
    let mut options = Options {
        json: false,
        data_root: None,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--data" => {
                let dir = args.next().ok_or("--data expects a directory")?;
                options.data_root = Some(PathBuf::from(dir));
            }
            "--version" => {
                println!("{}", build_info::current().banner());
                return Ok(None);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(None);
            }
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }
    Ok(Some(options))
}

fn run(options: Options) -> pocket_ledger::Result<()> {
    let mut config = ConfigManager::for_user()?.load()?;
    init_with_filter(config.log_filter.as_deref());
    if let Some(root) = options.data_root {
        config.backup_root = Some(root.join("backups"));
        config.data_root = Some(root);
    }

    let session = LedgerSession::from_config(&config)?;
    let Some(profile) = session.active() else {
        println!("{}", "No hay ningún perfil activo.".yellow());
        return Ok(());
    };
    let overview = Overview::build(profile, session.clock());
    if options.json {
        println!("{}", overview.to_json()?);
    } else {
        print!("{}", overview.render());
    }
    Ok(())
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message.red());
            return ExitCode::from(2);
        }
    };
    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
