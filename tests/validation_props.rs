//! Property tests for form validation.

mod common;

use backtest_desk::domain::error::ValidationError;
use backtest_desk::domain::params::{ParamField, ParamInputs};
use backtest_desk::domain::upload::UploadSelection;
use backtest_desk::domain::validation::{validate_params, validate_submission};
use common::*;
use proptest::prelude::*;

fn any_field() -> impl Strategy<Value = ParamField> {
    (0..ParamField::ALL.len()).prop_map(|i| ParamField::ALL[i])
}

proptest! {
    #[test]
    fn overbought_not_above_oversold_is_rejected(
        overbought in 1u32..100,
        gap in 0u32..50,
    ) {
        let inputs = ParamInputs::default()
            .with(ParamField::RsiOverbought, overbought.to_string())
            .with(ParamField::RsiOversold, (overbought + gap).to_string());
        prop_assert_eq!(validate_params(&inputs), Err(ValidationError::RsiOrdering));
    }

    #[test]
    fn fast_not_below_slow_is_rejected(slow in 1u32..500, gap in 0u32..50) {
        let inputs = ParamInputs::default()
            .with(ParamField::MacdFast, (slow + gap).to_string())
            .with(ParamField::MacdSlow, slow.to_string());
        prop_assert_eq!(validate_params(&inputs), Err(ValidationError::MacdOrdering));
    }

    #[test]
    fn non_positive_value_names_its_field(field in any_field(), value in -1000.0f64..=0.0) {
        let inputs = ParamInputs::default().with(field, value.to_string());
        prop_assert_eq!(
            validate_params(&inputs),
            Err(ValidationError::InvalidField { field })
        );
    }

    #[test]
    fn fractional_period_names_its_field(
        field in any_field().prop_filter("period fields", |f| f.is_period()),
        whole in 1u32..200,
        tenths in 1u32..10,
    ) {
        let inputs = ParamInputs::default().with(field, format!("{whole}.{tenths}"));
        prop_assert_eq!(
            validate_params(&inputs),
            Err(ValidationError::InvalidField { field })
        );
    }

    #[test]
    fn fractional_rsi_levels_are_accepted(oversold in 1.0f64..50.0, gap in 0.5f64..40.0) {
        let inputs = ParamInputs::default()
            .with(ParamField::RsiOversold, oversold.to_string())
            .with(ParamField::RsiOverbought, (oversold + gap).to_string());
        let params = validate_params(&inputs).unwrap();
        prop_assert_eq!(params.rsi_oversold, oversold);
    }

    #[test]
    fn non_numeric_value_names_its_field(field in any_field(), text in "[a-zA-Z ]{0,12}") {
        prop_assume!(text.trim().parse::<f64>().is_err());
        let inputs = ParamInputs::default().with(field, text);
        prop_assert_eq!(
            validate_params(&inputs),
            Err(ValidationError::InvalidField { field })
        );
    }

    #[test]
    fn ordered_positive_values_pass(
        oversold in 1u32..50,
        rsi_gap in 1u32..50,
        fast in 1u32..30,
        macd_gap in 1u32..30,
        ma in 1u32..400,
    ) {
        let inputs = ParamInputs::default()
            .with(ParamField::MaPeriod, ma.to_string())
            .with(ParamField::RsiOversold, oversold.to_string())
            .with(ParamField::RsiOverbought, (oversold + rsi_gap).to_string())
            .with(ParamField::MacdFast, fast.to_string())
            .with(ParamField::MacdSlow, (fast + macd_gap).to_string());

        let params = validate_params(&inputs).unwrap();
        prop_assert_eq!(params.ma_period, ma);
        prop_assert!(params.rsi_overbought > params.rsi_oversold);
        prop_assert!(params.macd_fast < params.macd_slow);
    }

    #[test]
    fn non_csv_name_is_invalid_file_type(name in "[a-z]{1,8}\\.(txt|xlsx|json|cs)") {
        let upload = UploadSelection::new(name.clone(), PRICES_CSV);
        prop_assert_eq!(
            validate_submission(Some(&upload), &ParamInputs::default()),
            Err(ValidationError::InvalidFileType { name })
        );
    }

    #[test]
    fn file_errors_win_over_field_errors(field in any_field()) {
        let inputs = ParamInputs::default().with(field, "");
        prop_assert_eq!(
            validate_submission(None, &inputs),
            Err(ValidationError::MissingFile)
        );
    }
}
