use super::*;

#[test]
fn parses_cheapest_with_defaults() {
    let cli = Cli::try_parse_from(["quarryquote-cli", "cheapest", "prices.csv"])
        .expect("expected valid cli args");

    let Commands::Cheapest {
        file,
        location,
        account_holder,
        include_delivery,
        tons,
        surcharge,
    } = cli.command
    else {
        panic!("expected cheapest command");
    };
    assert_eq!(file, PathBuf::from("prices.csv"));
    assert!(location.location_name.is_none());
    assert!(location.location_number.is_none());
    assert!(!account_holder);
    assert!(!include_delivery);
    assert!(tons.is_none());
    assert_eq!(surcharge.surcharge, Decimal::new(10, 2));
    assert!(!surcharge.no_surcharge);
    assert!(!cli.verbose);
}

#[test]
fn parses_cheapest_with_all_flags() {
    let cli = Cli::try_parse_from([
        "quarryquote-cli",
        "cheapest",
        "prices.csv",
        "--location-name",
        "Cherokee",
        "--location-number",
        "594",
        "--account-holder",
        "--include-delivery",
        "--tons",
        "12.5",
        "--no-surcharge",
        "-v",
    ])
    .expect("expected valid cli args");

    assert!(cli.verbose);
    assert!(matches!(
        cli.command,
        Commands::Cheapest {
            ref location,
            account_holder: true,
            include_delivery: true,
            tons: Some(t),
            surcharge: SurchargeArgs { no_surcharge: true, .. },
            ..
        } if location.location_name.as_deref() == Some("Cherokee")
            && location.location_number.as_deref() == Some("594")
            && t == Decimal::new(125, 1)
    ));
}

#[test]
fn surcharge_and_no_surcharge_conflict() {
    let result = Cli::try_parse_from([
        "quarryquote-cli",
        "cheapest",
        "prices.csv",
        "--surcharge",
        "0.25",
        "--no-surcharge",
    ]);
    assert!(result.is_err());
}

#[test]
fn cheapest_requires_file() {
    assert!(Cli::try_parse_from(["quarryquote-cli", "cheapest"]).is_err());
}

#[test]
fn parses_products_csv_export() {
    let cli = Cli::try_parse_from([
        "quarryquote-cli",
        "products",
        "prices.csv",
        "--surcharge",
        "0.25",
        "--csv",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Products {
            csv: true,
            surcharge: SurchargeArgs { surcharge: s, no_surcharge: false },
            ..
        } if s == Decimal::new(25, 2)
    ));
}

#[test]
fn parses_quote_with_auto_default() {
    let cli = Cli::try_parse_from([
        "quarryquote-cli",
        "quote",
        "--destination",
        "D_HSV_AVIA",
        "--tons",
        "25",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Quote {
            ref destination,
            material_id: MaterialSelection::Auto,
            ..
        } if destination == "D_HSV_AVIA"
    ));
}

#[test]
fn parses_quote_with_forced_material() {
    let cli = Cli::try_parse_from([
        "quarryquote-cli",
        "quote",
        "--destination",
        "D_FLOR_B",
        "--tons",
        "18",
        "--material-id",
        "14",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Quote {
            material_id: MaterialSelection::Forced(14),
            ..
        }
    ));
}

#[test]
fn rejects_invalid_material_id() {
    let result = Cli::try_parse_from([
        "quarryquote-cli",
        "quote",
        "--destination",
        "D_FLOR_B",
        "--tons",
        "18",
        "--material-id",
        "gravel",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_catalog_command() {
    let cli = Cli::try_parse_from(["quarryquote-cli", "catalog"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Catalog));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["quarryquote-cli"]).is_err());
}

#[test]
fn resolve_tons_defaults_and_rejects_non_positive() {
    let default = Decimal::new(25, 0);
    assert_eq!(resolve_tons(None, default).expect("tons"), default);
    assert_eq!(
        resolve_tons(Some(Decimal::new(10, 0)), default).expect("tons"),
        Decimal::new(10, 0)
    );
    assert!(resolve_tons(Some(Decimal::ZERO), default).is_err());
    assert!(resolve_tons(None, Decimal::ZERO).is_err());
}

#[test]
fn money_formatting() {
    assert_eq!(fmt_money(Decimal::new(4905, 1)), "$490.50");
    assert_eq!(fmt_money(Decimal::new(585_875, 3)), "$585.88");
    assert_eq!(fmt_optional_money(None), "\u{2014}");
}
