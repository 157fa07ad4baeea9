use clap::Parser;
use resplan::cli::commands::config::ConfigCommands;
use resplan::cli::commands::cost_category::CostCategoryCommands;
use resplan::cli::commands::resources::{ResourcesCommands, SortColumn};
use resplan::cli::commands::sequence::SequenceCommands;
use resplan::cli::{Cli, Commands};
use resplan::domain::models::AllocationType;

#[test]
fn test_parse_sequence_add() {
    let cli = Cli::try_parse_from(["resplan", "sequence", "add", "PRJ", "--digits", "7", "--activate"]).unwrap();

    match cli.command {
        Commands::Sequence(args) => match args.command {
            SequenceCommands::Add { prefix, digits, activate } => {
                assert_eq!(prefix, "PRJ");
                assert_eq!(digits, 7);
                assert!(activate);
            }
            other => panic!("Wrong sequence command: {other:?}"),
        },
        other => panic!("Wrong top-level command: {other:?}"),
    }
}

#[test]
fn test_sequence_add_defaults_to_five_digits() {
    let cli = Cli::try_parse_from(["resplan", "sequence", "add", "PRJ"]).unwrap();
    match cli.command {
        Commands::Sequence(args) => {
            assert!(matches!(args.command, SequenceCommands::Add { digits: 5, activate: false, .. }));
        }
        other => panic!("Wrong top-level command: {other:?}"),
    }
}

#[test]
fn test_parse_config_set() {
    let cli = Cli::try_parse_from([
        "resplan",
        "--json",
        "config",
        "set",
        "--company-code",
        "ACME",
        "--generate-resource-codes",
        "false",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Config(args) => match args.command {
            ConfigCommands::Set {
                company_code,
                default_calendar,
                generate_criterion_codes,
                generate_resource_codes,
            } => {
                assert_eq!(company_code.as_deref(), Some("ACME"));
                assert!(default_calendar.is_none());
                assert!(generate_criterion_codes.is_none());
                assert_eq!(generate_resource_codes, Some(false));
            }
            other => panic!("Wrong config command: {other:?}"),
        },
        other => panic!("Wrong top-level command: {other:?}"),
    }
}

#[test]
fn test_parse_resources_search() {
    let cli = Cli::try_parse_from([
        "resplan",
        "resources",
        "--catalog",
        "demos/catalog.yaml",
        "search",
        "--type",
        "generic-workers",
        "-c",
        "Welding",
        "-c",
        "Vigo",
        "--start",
        "2024-06-03",
        "--end",
        "2024-06-07",
        "--sort",
        "availability",
        "--desc",
    ])
    .unwrap();

    match cli.command {
        Commands::Resources(args) => {
            assert_eq!(args.catalog.to_str(), Some("demos/catalog.yaml"));
            match args.command {
                ResourcesCommands::Search(search) => {
                    assert_eq!(search.allocation_type, Some(AllocationType::GenericWorkers));
                    assert_eq!(search.criterion, vec!["Welding", "Vigo"]);
                    assert_eq!(search.start.map(|d| d.to_string()).as_deref(), Some("2024-06-03"));
                    assert!(matches!(search.sort, Some(SortColumn::Availability)));
                    assert!(search.desc);
                }
                other => panic!("Wrong resources command: {other:?}"),
            }
        }
        other => panic!("Wrong top-level command: {other:?}"),
    }
}

#[test]
fn test_rejects_unknown_allocation_type() {
    let result = Cli::try_parse_from(["resplan", "resources", "tree", "--type", "everyone"]);
    assert!(result.is_err());
}

#[test]
fn test_desc_requires_sort() {
    let result = Cli::try_parse_from(["resplan", "resources", "search", "--desc"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_cost_category_list_active() {
    let cli = Cli::try_parse_from(["resplan", "cost-category", "list", "--active"]).unwrap();
    match cli.command {
        Commands::CostCategory(args) => {
            assert!(matches!(args.command, CostCategoryCommands::List { active: true }));
        }
        other => panic!("Wrong top-level command: {other:?}"),
    }
}
