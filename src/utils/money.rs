use crate::models::TaxType;
use rust_decimal::Decimal;

/// 计算含税总额
///
/// flat 为固定税额, percentage 为按金额比例计税,
/// 结果固定保留两位小数。
pub fn total_amount(amount: Decimal, tax: Decimal, tax_type: TaxType) -> Decimal {
    let total = match tax_type {
        TaxType::Flat => amount + tax,
        TaxType::Percentage => amount + amount * tax / Decimal::ONE_HUNDRED,
    };

    quantize(total)
}

/// 归一化为两位小数
pub fn quantize(value: Decimal) -> Decimal {
    let mut value = value.round_dp(2);
    value.rescale(2);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_flat_tax() {
        assert_eq!(
            total_amount(dec("100"), dec("10"), TaxType::Flat).to_string(),
            "110.00"
        );
        assert_eq!(
            total_amount(dec("99.99"), dec("0"), TaxType::Flat).to_string(),
            "99.99"
        );
    }

    #[test]
    fn test_percentage_tax() {
        assert_eq!(
            total_amount(dec("200"), dec("10"), TaxType::Percentage).to_string(),
            "220.00"
        );
        assert_eq!(
            total_amount(dec("100"), dec("0"), TaxType::Percentage).to_string(),
            "100.00"
        );
    }

    #[test]
    fn test_percentage_tax_is_rounded() {
        // 33.33 * 7.5% = 2.49975 -> 35.83
        assert_eq!(
            total_amount(dec("33.33"), dec("7.5"), TaxType::Percentage).to_string(),
            "35.83"
        );
    }

    #[test]
    fn test_quantize_pads_to_two_decimals() {
        assert_eq!(quantize(dec("110")).to_string(), "110.00");
        assert_eq!(quantize(dec("110.1")).to_string(), "110.10");
    }
}
