use chrono::NaiveDate;
use finance_forecast_core::errors::CoreError;
use finance_forecast_core::models::budget::{BudgetForecast, ExpenseEntry, SavingsGoal};
use finance_forecast_core::models::holding::{Holding, HoldingType};
use finance_forecast_core::models::money::{
    parse_amount_input, round_to_cents, to_monthly, Frequency, MoneyAmount,
};
use finance_forecast_core::models::portfolio::{Account, PortfolioSnapshot};
use finance_forecast_core::models::price::{
    days_before, is_chronological, is_renderable, PricePoint, TimeRange,
};
use finance_forecast_core::models::settings::EngineSettings;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ═══════════════════════════════════════════════════════════════════
//  Frequency & normalization
// ═══════════════════════════════════════════════════════════════════

mod frequency {
    use super::*;

    #[test]
    fn multipliers_are_fixed() {
        assert_eq!(Frequency::Daily.monthly_multiplier(), 30.0);
        assert_eq!(Frequency::Weekly.monthly_multiplier(), 4.345);
        assert_eq!(Frequency::Biweekly.monthly_multiplier(), 2.1725);
        assert_eq!(Frequency::Monthly.monthly_multiplier(), 1.0);
        assert_eq!(Frequency::Yearly.monthly_multiplier(), 1.0 / 12.0);
    }

    #[test]
    fn to_monthly_examples() {
        assert!(approx(to_monthly(10.0, Frequency::Daily), 300.0));
        assert!(approx(to_monthly(1000.0, Frequency::Weekly), 4345.0));
        assert!(approx(to_monthly(2000.0, Frequency::Biweekly), 4345.0));
        assert_eq!(to_monthly(1200.0, Frequency::Monthly), 1200.0);
        assert!(approx(to_monthly(12000.0, Frequency::Yearly), 1000.0));
    }

    #[test]
    fn to_monthly_does_not_round() {
        let v = to_monthly(1.0, Frequency::Yearly);
        assert!(v > 0.0833 && v < 0.0834);
        assert_ne!(v, round_to_cents(v));
    }

    #[test]
    fn parse_and_display_are_inverse() {
        for f in Frequency::ALL {
            let parsed: Frequency = f.to_string().parse().unwrap();
            assert_eq!(parsed, f);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" MONTHLY ".parse::<Frequency>().unwrap(), Frequency::Monthly);
    }

    #[test]
    fn parse_unknown_is_contract_error() {
        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownVariant { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Frequency::Biweekly).unwrap(), "\"biweekly\"");
        let f: Frequency = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(f, Frequency::Yearly);
    }

    #[test]
    fn serde_rejects_unknown_names() {
        assert!(serde_json::from_str::<Frequency>("\"hourly\"").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MoneyAmount & form input
// ═══════════════════════════════════════════════════════════════════

mod money_amount {
    use super::*;

    #[test]
    fn positive_predicate() {
        assert!(MoneyAmount::monthly(1.0).is_positive());
        assert!(!MoneyAmount::monthly(0.0).is_positive());
        assert!(!MoneyAmount::monthly(-5.0).is_positive());
        assert!(!MoneyAmount::monthly(f64::NAN).is_positive());
        assert!(!MoneyAmount::monthly(f64::INFINITY).is_positive());
    }

    #[test]
    fn to_monthly_uses_frequency() {
        let m = MoneyAmount::new(100.0, Frequency::Daily);
        assert!(approx(m.to_monthly(), 3000.0));
    }

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(parse_amount_input("4000"), Some(4000.0));
        assert_eq!(parse_amount_input(" 12.50 "), Some(12.5));
    }

    #[test]
    fn parse_currency_formatting() {
        assert_eq!(parse_amount_input("$1,200.50"), Some(1200.5));
        assert_eq!(parse_amount_input("$ 40"), Some(40.0));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert_eq!(parse_amount_input(""), None);
        assert_eq!(parse_amount_input("   "), None);
        assert_eq!(parse_amount_input("abc"), None);
        assert_eq!(parse_amount_input("12abc"), None);
        assert_eq!(parse_amount_input("NaN"), None);
        assert_eq!(parse_amount_input("inf"), None);
    }

    #[test]
    fn parse_keeps_sign() {
        assert_eq!(parse_amount_input("-20"), Some(-20.0));
    }

    #[test]
    fn round_to_cents_examples() {
        assert_eq!(round_to_cents(368.2393), 368.24);
        assert_eq!(round_to_cents(53.3333), 53.33);
        assert_eq!(round_to_cents(-10.005_1), -10.01);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SavingsGoal
// ═══════════════════════════════════════════════════════════════════

mod savings_goal {
    use super::*;

    #[test]
    fn rates() {
        assert_eq!(SavingsGoal::Light.rate(), 0.10);
        assert_eq!(SavingsGoal::Moderate.rate(), 0.20);
        assert_eq!(SavingsGoal::Aggressive.rate(), 0.30);
    }

    #[test]
    fn default_is_moderate() {
        assert_eq!(SavingsGoal::default(), SavingsGoal::Moderate);
    }

    #[test]
    fn parse() {
        assert_eq!("aggressive".parse::<SavingsGoal>().unwrap(), SavingsGoal::Aggressive);
        assert!("extreme".parse::<SavingsGoal>().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ExpenseEntry
// ═══════════════════════════════════════════════════════════════════

mod expense_entry {
    use super::*;

    #[test]
    fn new_trims_category() {
        let e = ExpenseEntry::new("  Housing ", Some(1200.0), Frequency::Monthly).unwrap();
        assert_eq!(e.category, "Housing");
    }

    #[test]
    fn new_rejects_blank_category() {
        let err = ExpenseEntry::new("  ", Some(10.0), Frequency::Monthly).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn ids_are_unique() {
        let a = ExpenseEntry::new("Food", Some(1.0), Frequency::Daily).unwrap();
        let b = ExpenseEntry::new("Food", Some(1.0), Frequency::Daily).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn countable_monthly_normalizes() {
        let e = ExpenseEntry::new("Coffee", Some(5.0), Frequency::Daily).unwrap();
        assert_eq!(e.countable_monthly(), Some(150.0));
    }

    #[test]
    fn soft_invalid_rows_do_not_count() {
        for amount in [None, Some(0.0), Some(-3.0), Some(f64::NAN)] {
            let e = ExpenseEntry::new("Misc", amount, Frequency::Monthly).unwrap();
            assert_eq!(e.countable_monthly(), None);
        }
    }

    #[test]
    fn set_category_rejects_blank_and_keeps_old() {
        let mut e = ExpenseEntry::new("Food", Some(1.0), Frequency::Weekly).unwrap();
        assert!(e.set_category("").is_err());
        assert_eq!(e.category, "Food");
        e.set_category("Groceries").unwrap();
        assert_eq!(e.category, "Groceries");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  BudgetForecast
// ═══════════════════════════════════════════════════════════════════

mod budget_forecast {
    use super::*;

    fn sample(spendable: f64) -> BudgetForecast {
        BudgetForecast {
            monthly_income: 4000.0,
            monthly_expenses: 1600.0,
            daily_spendable: spendable / 30.0,
            weekly_spendable: spendable / 4.345,
            monthly_spendable: spendable,
            monthly_savings: 800.0,
            yearly_savings: 9600.0,
        }
    }

    #[test]
    fn overspending_flag() {
        assert!(!sample(1600.0).is_overspending());
        assert!(!sample(0.0).is_overspending());
        assert!(sample(-1.0).is_overspending());
    }

    #[test]
    fn rounded_for_display() {
        let r = sample(1600.0).rounded();
        assert_eq!(r.weekly_spendable, 368.24);
        assert_eq!(r.daily_spendable, 53.33);
        assert_eq!(r.monthly_spendable, 1600.0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&sample(1600.0)).unwrap();
        assert!(json.contains("\"monthlySpendable\""));
        assert!(json.contains("\"yearlySavings\""));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PricePoint & TimeRange
// ═══════════════════════════════════════════════════════════════════

mod time_range {
    use super::*;

    #[test]
    fn one_week_is_six_days_back() {
        assert_eq!(TimeRange::OneWeek.start_date(d(2026, 10, 18)), d(2026, 10, 12));
    }

    #[test]
    fn one_month_back() {
        assert_eq!(TimeRange::OneMonth.start_date(d(2026, 10, 18)), d(2026, 9, 18));
    }

    #[test]
    fn one_month_back_clamps_short_month() {
        assert_eq!(TimeRange::OneMonth.start_date(d(2026, 3, 31)), d(2026, 2, 28));
    }

    #[test]
    fn three_months_back() {
        assert_eq!(TimeRange::ThreeMonths.start_date(d(2026, 10, 18)), d(2026, 7, 18));
    }

    #[test]
    fn ytd_is_january_first() {
        assert_eq!(TimeRange::YearToDate.start_date(d(2026, 10, 18)), d(2026, 1, 1));
        assert_eq!(TimeRange::YearToDate.start_date(d(2026, 1, 1)), d(2026, 1, 1));
    }

    #[test]
    fn all_is_one_year_back() {
        assert_eq!(TimeRange::All.start_date(d(2026, 10, 18)), d(2025, 10, 18));
    }

    #[test]
    fn parse_and_display() {
        for r in TimeRange::ALL_RANGES {
            assert_eq!(r.to_string().parse::<TimeRange>().unwrap(), r);
        }
        assert_eq!("ytd".parse::<TimeRange>().unwrap(), TimeRange::YearToDate);
        assert!(matches!(
            "5Y".parse::<TimeRange>().unwrap_err(),
            CoreError::UnknownVariant { .. }
        ));
    }

    #[test]
    fn serde_uses_display_labels() {
        assert_eq!(serde_json::to_string(&TimeRange::ThreeMonths).unwrap(), "\"3M\"");
        let r: TimeRange = serde_json::from_str("\"1W\"").unwrap();
        assert_eq!(r, TimeRange::OneWeek);
    }
}

mod price_point {
    use super::*;

    #[test]
    fn serde_iso_date() {
        let p = PricePoint::new(d(2026, 10, 18), 101.5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"date":"2026-10-18","value":101.5}"#);
        let back: PricePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn renderable_needs_two_points() {
        let p = PricePoint::new(d(2026, 1, 1), 1.0);
        assert!(!is_renderable(&[]));
        assert!(!is_renderable(&[p]));
        assert!(is_renderable(&[p, p]));
    }

    #[test]
    fn chronological_check() {
        let a = PricePoint::new(d(2026, 1, 1), 1.0);
        let b = PricePoint::new(d(2026, 1, 2), 1.0);
        assert!(is_chronological(&[a, b]));
        assert!(is_chronological(&[a, a]));
        assert!(!is_chronological(&[b, a]));
    }

    #[test]
    fn days_before_crosses_year() {
        assert_eq!(days_before(d(2026, 1, 1), 1), d(2025, 12, 31));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn new_derives_value_and_uppercases() {
        let h = Holding::new(" aapl ", "Apple", HoldingType::Stock, 10.0, 150.0);
        assert_eq!(h.ticker, "AAPL");
        assert_eq!(h.value(), 1500.0);
    }

    #[test]
    fn setters_recompute_value() {
        let mut h = Holding::new("BTC", "Bitcoin", HoldingType::Crypto, 0.5, 60000.0);
        h.set_quantity(1.0);
        assert_eq!(h.value(), 60000.0);
        h.set_current_price(50000.0);
        assert_eq!(h.value(), 50000.0);
    }

    #[test]
    fn stored_value_is_ignored() {
        let json = r#"{"ticker":"VTI","name":"Total Market","type":"etf",
            "quantity":2,"currentPrice":250,"value":999999}"#;
        let mut h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.value(), 0.0);
        h.recompute_value();
        assert_eq!(h.value(), 500.0);
    }

    #[test]
    fn value_is_serialized() {
        let h = Holding::new("VTI", "Total Market", HoldingType::Etf, 2.0, 250.0);
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.contains("\"value\":500.0"));
        assert!(json.contains("\"type\":\"etf\""));
        assert!(json.contains("\"priceHistory7d\""));
    }

    #[test]
    fn price_history_alias() {
        let json = r#"{"ticker":"X","name":"X","type":"stock",
            "priceHistory":[{"date":"2026-10-17","value":1.0}]}"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.price_history.len(), 1);
    }

    #[test]
    fn equity_types() {
        assert!(HoldingType::Stock.is_equity());
        assert!(HoldingType::Etf.is_equity());
        assert!(!HoldingType::Crypto.is_equity());
    }

    #[test]
    fn holding_type_parse() {
        assert_eq!("ETF".parse::<HoldingType>().unwrap(), HoldingType::Etf);
        assert!("bond".parse::<HoldingType>().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PortfolioSnapshot & Account
// ═══════════════════════════════════════════════════════════════════

mod portfolio_snapshot {
    use super::*;

    #[test]
    fn default_is_empty() {
        let s = PortfolioSnapshot::default();
        assert!(s.is_empty());
        assert_eq!(s.total_value, 0.0);
    }

    #[test]
    fn holdings_value_sums_holdings() {
        let s = PortfolioSnapshot {
            holdings: vec![
                Holding::new("A", "A", HoldingType::Stock, 2.0, 10.0),
                Holding::new("B", "B", HoldingType::Crypto, 1.0, 5.0),
            ],
            ..Default::default()
        };
        assert_eq!(s.holdings_value(), 25.0);
    }

    #[test]
    fn missing_fields_default() {
        let s: PortfolioSnapshot = serde_json::from_str(r#"{"totalValue":12.5}"#).unwrap();
        assert_eq!(s.total_value, 12.5);
        assert!(s.holdings.is_empty());
        assert!(s.history.is_empty());
    }

    #[test]
    fn account_optional_fields() {
        let a: Account = serde_json::from_str(r#"{"id":"a1","name":"Checking"}"#).unwrap();
        assert_eq!(a, Account::new("a1", "Checking", 0.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  EngineSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = EngineSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.holding_history_days, 7);
        assert_eq!(s.chart_palette.len(), 8);
    }

    #[test]
    fn volatility_by_type() {
        let s = EngineSettings::default();
        assert_eq!(s.volatility_for(HoldingType::Stock), 0.02);
        assert_eq!(s.volatility_for(HoldingType::Etf), 0.015);
        assert_eq!(s.volatility_for(HoldingType::Crypto), 0.05);
    }

    #[test]
    fn from_json_fills_missing_keys() {
        let s = EngineSettings::from_json(r#"{"cryptoVolatility":0.1}"#).unwrap();
        assert_eq!(s.crypto_volatility, 0.1);
        assert_eq!(s.stock_volatility, 0.02);
    }

    #[test]
    fn from_json_rejects_bad_volatility() {
        let err = EngineSettings::from_json(r#"{"stockVolatility":1.5}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn from_json_rejects_empty_palette() {
        let err = EngineSettings::from_json(r#"{"chartPalette":[]}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn from_json_rejects_short_history() {
        let err = EngineSettings::from_json(r#"{"holdingHistoryDays":1}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn from_json_reports_malformed_json() {
        let err = EngineSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
