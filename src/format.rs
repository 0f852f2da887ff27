//! Reply formatting for coin market data.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::traits::CoinRecord;

const UP: &str = "🔺";
const DOWN: &str = "🔻";

/// Render a coin summary with `now` as the reported time.
pub fn format_coin_message(coin: &CoinRecord, now: DateTime<Tz>) -> String {
    let indicator = if coin.change_24h_pct >= 0.0 { UP } else { DOWN };

    format!(
        "{} ({})\n\
         Current Price: ${}\n\
         24h Change: {}{:.2}%\n\
         24h Volume (USD): ${}\n\
         Market Cap (USD): ${}\n\
         Current Time: {}",
        coin.name,
        coin.symbol.to_uppercase(),
        group_thousands(coin.price_usd),
        indicator,
        coin.change_24h_pct.abs(),
        group_thousands(coin.volume_24h_usd),
        group_thousands(coin.market_cap_usd),
        now.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Two decimal places with commas between thousands, e.g. `1,234.50`.
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;

    use super::*;

    fn bitcoin(change: f64) -> CoinRecord {
        CoinRecord {
            name: "Bitcoin".into(),
            symbol: "btc".into(),
            price_usd: 65000.00,
            change_24h_pct: change,
            volume_24h_usd: 30_000_000_000.0,
            market_cap_usd: 1_200_000_000_000.0,
        }
    }

    #[test]
    fn renders_all_fields() {
        let now = Chicago.with_ymd_and_hms(2024, 3, 14, 9, 5, 7).unwrap();
        let msg = format_coin_message(&bitcoin(1.234), now);

        assert_eq!(
            msg,
            "Bitcoin (BTC)\n\
             Current Price: $65,000.00\n\
             24h Change: 🔺1.23%\n\
             24h Volume (USD): $30,000,000,000.00\n\
             Market Cap (USD): $1,200,000,000,000.00\n\
             Current Time: 2024-03-14 09:05:07"
        );
    }

    #[test]
    fn negative_change_uses_down_indicator_and_drops_sign() {
        let now = Chicago.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let msg = format_coin_message(&bitcoin(-2.5), now);

        assert!(msg.contains("24h Change: 🔻2.50%"));
        assert!(!msg.contains("-2.50"));
    }

    #[test]
    fn zero_change_counts_as_up() {
        let now = Chicago.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(format_coin_message(&bitcoin(0.0), now).contains("🔺0.00%"));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(999.999), "1,000.00");
        assert_eq!(group_thousands(1234.5), "1,234.50");
        assert_eq!(group_thousands(0.004), "0.00");
        assert_eq!(group_thousands(123456.789), "123,456.79");
        assert_eq!(group_thousands(-9876543.21), "-9,876,543.21");
    }
}
