use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use std::path::PathBuf;

fn arg_verbose() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Debug mode")
}

fn arg_threads() -> Arg {
    Arg::new("threads")
        .short('t')
        .long("threads")
        .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
        .default_value("1")
        .help("Number of files processed at the same time")
}

fn subcommand_trim() -> Command {
    Command::new("trim")
        .version("0.1")
        .about("Relabel FASTA records, drop unwanted ones, and keep the 3 longest records per species.")
        .arg(arg_verbose())
        .arg(arg_threads())
        .arg(
            Arg::new("files")
                .value_name("FASTA")
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .help("FASTA files to curate."),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Curate every .fasta/.fa file in DIR, skipping outputs of earlier runs."),
        )
        .group(
            ArgGroup::new("input")
                .args(["files", "dir"])
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::new("retain")
                .short('k')
                .long("retain")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .default_value("3")
                .help("Records kept per species."),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("TOKEN")
                .action(ArgAction::Append)
                .help("Reject headers containing TOKEN, on top of sp., sp, cf, cf., and mitochondrion."),
        )
        .arg(
            Arg::new("report")
                .short('o')
                .long("report")
                .value_name("JSON")
                .value_parser(value_parser!(PathBuf))
                .help("Write a JSON summary of every file."),
        )
}

fn subcommand_pipeline() -> Command {
    Command::new("pipeline")
        .version("0.1")
        .about("Run curation based on the given TOML file.")
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("TOML")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("TOML configuration file."),
        )
}

pub fn trim_fasta_parser() -> Command {
    Command::new("trim_fasta")
        .version("0.1")
        .about("Curate FASTA files downloaded from a nucleotide database")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(subcommand_trim())
        .subcommand(subcommand_pipeline())
}
