use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ip_whitelist::config::Config;
use ip_whitelist::error::WhitelistError;
use ip_whitelist::models::{Candidate, RuleId, RuleKind};
use ip_whitelist::output::{build_rule_rows, format_check_summary, format_rule_line, format_verdict, rule_print};
use ip_whitelist::processing::{
    add_rule, candidates_from_list, compute_containment_annotations, delete_rule, edit_rule,
    validate_candidate,
};
use ip_whitelist::store::{read_rule_file_for_update, write_rule_file};
use ip_whitelist::{check_for_duplicate_rules, get_rule_set};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

const LOG_CONFIG_FILE: &str = "log4rs.yml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage and check the IP whitelist", long_about = None)]
struct Args {
    /// Rule file (default: $WHITELIST_RULES_FILE or whitelist_rules.json)
    #[arg(short = 'f', long, global = true)]
    rules_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List rules with their "contained by" status
    List {
        /// Print CSV instead of coloured lines
        #[arg(long)]
        csv: bool,
    },
    /// Check candidate values without changing the whitelist
    Check {
        /// Addresses or CIDR blocks; commas, semicolons and spaces also separate
        #[arg(required = true)]
        values: Vec<String>,
        /// Declared kind (default: detected from the value)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Validate and add a rule
    Add {
        value: String,
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Operator recorded as creator (default: $WHITELIST_OPERATOR or admin)
        #[arg(long)]
        by: Option<String>,
    },
    /// Validate and change value, kind or description of a rule
    Edit {
        id: String,
        value: String,
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a rule
    Delete { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Single,
    Cidr,
}

impl From<KindArg> for RuleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Single => RuleKind::Single,
            KindArg::Cidr => RuleKind::Cidr,
        }
    }
}

fn candidate(value: &str, kind: Option<KindArg>) -> Candidate {
    match kind {
        Some(kind) => Candidate::new(value, kind.into()),
        None => Candidate::detect(value),
    }
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    if log4rs::init_file(LOG_CONFIG_FILE, Default::default()).is_ok() {
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {M} - {m}{n}",
        )))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    log::warn!("{LOG_CONFIG_FILE} not loaded, logging warnings to stderr");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let args = Args::parse();
    let config = Config::from_env()?;
    let explicit_file = args.rules_file.clone().or_else(|| config.rules_file.clone());
    let rules_file = explicit_file.as_deref().unwrap_or(config.rules_file());

    match args.command {
        Command::List { csv } => {
            let rules = get_rule_set(explicit_file.as_deref())?;
            if let Err(e) = check_for_duplicate_rules(&rules) {
                log::warn!("{e}");
            }
            if csv {
                rule_print(&rules, config.display_tz);
            } else {
                let annotations = compute_containment_annotations(&rules);
                for row in build_rule_rows(&rules, &annotations, config.display_tz) {
                    println!("{}", format_rule_line(&row));
                }
                println!("{} rules, {} contained by another rule", rules.len(), annotations.len());
            }
        }
        Command::Check { values, kind } => {
            let rules = get_rule_set(explicit_file.as_deref())?;
            let results: Vec<(Candidate, Result<(), WhitelistError>)> =
                candidates_from_list(&values.join(" "))
                    .into_iter()
                    .map(|c| candidate(&c.value, kind))
                    .map(|c| {
                        let result = validate_candidate(&c, &rules, None).map(|_| ());
                        (c, result)
                    })
                    .collect();
            for (c, result) in &results {
                println!("{}", format_verdict(c, result));
            }
            println!("{}", format_check_summary(&results));
            if results.iter().any(|(_, r)| r.is_err()) {
                std::process::exit(1);
            }
        }
        Command::Add {
            value,
            kind,
            description,
            by,
        } => {
            let mut rules = read_rule_file_for_update(rules_file)?;
            let by = by.unwrap_or_else(|| config.operator.clone());
            let rule = add_rule(&mut rules, candidate(&value, kind), &description, &by)?;
            write_rule_file(rules_file, &rules)?;
            println!("{} {} {} ({})", "ADDED".on_green(), rule.id, rule.value, rule.kind);
        }
        Command::Edit {
            id,
            value,
            kind,
            description,
        } => {
            let mut rules = read_rule_file_for_update(rules_file)?;
            let id = RuleId::from(id);
            let rule = edit_rule(&mut rules, &id, candidate(&value, kind), description.as_deref())?;
            write_rule_file(rules_file, &rules)?;
            println!("{} {} {} ({})", "EDITED".on_green(), rule.id, rule.value, rule.kind);
        }
        Command::Delete { id } => {
            let mut rules = read_rule_file_for_update(rules_file)?;
            let rule = delete_rule(&mut rules, &RuleId::from(id))?;
            write_rule_file(rules_file, &rules)?;
            println!("{} {} {}", "DELETED".on_red(), rule.id, rule.value);
        }
    }

    Ok(())
}
