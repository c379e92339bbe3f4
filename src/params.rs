use crate::core::Inputs;

const LEGACY_ABSOLUTE_THRESHOLD: f64 = 10_000_000.0;

pub fn default_inputs() -> Inputs {
    Inputs {
        portfolio_mio: 1000.0,
        share_managed: 0.30,
        advisory_fee_rate: 0.005,
        brokerage_fee_rate: 0.0,
        partner_share: 0.40,
        annual_growth_mio: 30.0,
        current_portfolio_cost_rate: 0.012,
        expected_portfolio_cost_rate: 0.006,
        current_advisory_fee_rate: 0.003,
        expected_advisory_fee_rate: 0.006,
    }
}

pub fn decode(query: &str) -> Inputs {
    let pairs: Vec<(&str, &str)> = query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| part.split_once('=').unwrap_or((part, "")))
        .collect();

    let mut inputs = default_inputs();
    if let Some(v) = portfolio_mio_value(&pairs) {
        inputs.portfolio_mio = v;
    }
    if let Some(v) = lookup(&pairs, "a") {
        inputs.share_managed = v;
    }
    if let Some(v) = lookup(&pairs, "rf") {
        inputs.advisory_fee_rate = v;
    }
    if let Some(v) = lookup(&pairs, "k") {
        inputs.brokerage_fee_rate = v;
    }
    if let Some(v) = lookup(&pairs, "ti") {
        inputs.partner_share = v;
    }
    if let Some(v) = lookup(&pairs, "g") {
        inputs.annual_growth_mio = v;
    }
    if let Some(v) = lookup(&pairs, "cpo") {
        inputs.current_portfolio_cost_rate = v;
    }
    if let Some(v) = lookup(&pairs, "epo") {
        inputs.expected_portfolio_cost_rate = v;
    }
    if let Some(v) = lookup(&pairs, "cf") {
        inputs.current_advisory_fee_rate = v;
    }
    if let Some(v) = lookup(&pairs, "ef") {
        inputs.expected_advisory_fee_rate = v;
    }
    inputs
}

pub fn encode(inputs: &Inputs) -> String {
    format!(
        "pm={}&a={}&rf={}&k={}&ti={}&g={}&cpo={}&epo={}&cf={}&ef={}",
        inputs.portfolio_mio,
        inputs.share_managed,
        inputs.advisory_fee_rate,
        inputs.brokerage_fee_rate,
        inputs.partner_share,
        inputs.annual_growth_mio,
        inputs.current_portfolio_cost_rate,
        inputs.expected_portfolio_cost_rate,
        inputs.current_advisory_fee_rate,
        inputs.expected_advisory_fee_rate,
    )
}

fn portfolio_mio_value(pairs: &[(&str, &str)]) -> Option<f64> {
    if let Some(pm) = lookup(pairs, "pm") {
        return Some(pm);
    }

    // Legacy links encoded the portfolio in absolute units under `p`; values
    // below the threshold are assumed to already be in millions.
    let p = lookup(pairs, "p")?;
    if p >= LEGACY_ABSOLUTE_THRESHOLD {
        Some((p / 1_000_000.0).round())
    } else {
        Some(p)
    }
}

fn lookup(pairs: &[(&str, &str)], key: &str) -> Option<f64> {
    pairs
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| parse_value(v))
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_projection;
    use proptest::prelude::{prop_assert_eq, proptest};

    #[test]
    fn empty_query_yields_defaults() {
        assert_eq!(decode(""), default_inputs());
        assert_eq!(decode("?"), default_inputs());
    }

    #[test]
    fn all_documented_keys_decode() {
        let inputs =
            decode("pm=500&a=0.25&rf=0.006&k=0.001&ti=0.35&g=20&cpo=0.011&epo=0.007&cf=0.0035&ef=0.005");
        assert_eq!(inputs.portfolio_mio, 500.0);
        assert_eq!(inputs.share_managed, 0.25);
        assert_eq!(inputs.advisory_fee_rate, 0.006);
        assert_eq!(inputs.brokerage_fee_rate, 0.001);
        assert_eq!(inputs.partner_share, 0.35);
        assert_eq!(inputs.annual_growth_mio, 20.0);
        assert_eq!(inputs.current_portfolio_cost_rate, 0.011);
        assert_eq!(inputs.expected_portfolio_cost_rate, 0.007);
        assert_eq!(inputs.current_advisory_fee_rate, 0.0035);
        assert_eq!(inputs.expected_advisory_fee_rate, 0.005);
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let defaults = default_inputs();
        assert_eq!(decode("a=abc").share_managed, defaults.share_managed);
        assert_eq!(decode("pm=").portfolio_mio, defaults.portfolio_mio);
        assert_eq!(decode("rf=NaN").advisory_fee_rate, defaults.advisory_fee_rate);
        assert_eq!(decode("g=inf").annual_growth_mio, defaults.annual_growth_mio);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(decode("zzz=9&utm_source=mail"), default_inputs());
    }

    #[test]
    fn first_occurrence_of_a_key_wins() {
        assert_eq!(decode("pm=250&pm=999").portfolio_mio, 250.0);
    }

    #[test]
    fn legacy_absolute_portfolio_is_converted_to_millions() {
        assert_eq!(decode("p=500000000").portfolio_mio, 500.0);
        assert_eq!(decode("p=1234567890").portfolio_mio, 1235.0);
        assert_eq!(decode("p=10000000").portfolio_mio, 10.0);
    }

    #[test]
    fn legacy_portfolio_below_threshold_is_taken_as_millions() {
        assert_eq!(decode("p=5").portfolio_mio, 5.0);
        assert_eq!(decode("p=9999999").portfolio_mio, 9_999_999.0);
    }

    #[test]
    fn pm_wins_over_legacy_p() {
        assert_eq!(decode("pm=250&p=500000000").portfolio_mio, 250.0);
    }

    #[test]
    fn encode_decode_round_trip_preserves_inputs() {
        let inputs = Inputs {
            portfolio_mio: 1234.0,
            share_managed: 0.33,
            advisory_fee_rate: 0.0055,
            brokerage_fee_rate: 0.0012,
            partner_share: 0.45,
            annual_growth_mio: 12.5,
            current_portfolio_cost_rate: 0.0119,
            expected_portfolio_cost_rate: 0.0061,
            current_advisory_fee_rate: 0.0031,
            expected_advisory_fee_rate: 0.0059,
        };
        assert_eq!(decode(&encode(&inputs)), inputs);
        assert_eq!(decode(&encode(&default_inputs())), default_inputs());
    }

    #[test]
    fn round_trip_reproduces_the_projection() {
        let inputs = decode("pm=800&a=0.5&rf=0.004&k=0.002&ti=0.5&g=40");
        let reloaded = decode(&encode(&inputs));
        assert_eq!(run_projection(&reloaded), run_projection(&inputs));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_encode_decode_round_trips(
            portfolio_mio in 0.0..1_000_000.0f64,
            share_managed in 0.0..=1.0f64,
            advisory_fee_rate in 0.0..0.1f64,
            brokerage_fee_rate in 0.0..0.1f64,
            partner_share in 0.0..=1.0f64,
            annual_growth_mio in 0.0..100_000.0f64,
            current_portfolio_cost_rate in 0.0..0.1f64,
            expected_portfolio_cost_rate in 0.0..0.1f64,
            current_advisory_fee_rate in 0.0..0.1f64,
            expected_advisory_fee_rate in 0.0..0.1f64
        ) {
            let inputs = Inputs {
                portfolio_mio,
                share_managed,
                advisory_fee_rate,
                brokerage_fee_rate,
                partner_share,
                annual_growth_mio,
                current_portfolio_cost_rate,
                expected_portfolio_cost_rate,
                current_advisory_fee_rate,
                expected_advisory_fee_rate,
            };
            prop_assert_eq!(decode(&encode(&inputs)), inputs);
        }
    }
}
