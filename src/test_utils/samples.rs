use crate::api::{
    CategoryTotal, MonthlyTrend, Statistics, SummaryResponse, TransactionPage, TransactionRecord,
    TypeBreakdown,
};

pub(crate) fn sample_record(id: &str) -> TransactionRecord {
    TransactionRecord {
        transaction_id: id.to_owned(),
        transaction_type: "BANK_DEPOSIT".to_owned(),
        amount: Some(25_000.0),
        fee: Some(100.0),
        transaction_date: Some("2025-01-14 10:00:00".to_owned()),
        sender: Some("Bank of Kigali".to_owned()),
        recipient: Some("Jane Doe".to_owned()),
        phone_number: Some("250788110381".to_owned()),
        balance: Some(125_000.0),
        message: Some("A bank deposit of 25000 RWF has been added to your mobile money account".to_owned()),
    }
}

/// Page 1 of `total` transactions holding `count` records.
pub(crate) fn sample_page(total: u64, count: usize) -> TransactionPage {
    TransactionPage {
        total,
        transactions: (1..=count)
            .map(|index| sample_record(&format!("TX{index}")))
            .collect(),
        page: 1,
        per_page: 10,
        total_pages: total.div_ceil(10),
    }
}

pub(crate) fn sample_summary() -> SummaryResponse {
    SummaryResponse {
        total_transactions: 1250,
        total_volume: 2_500_000.0,
        statistics: Statistics {
            avg_amount: 2000.0,
            max_amount: 500_000.0,
            total_fees: 12_350.0,
            most_active_day: Some("2025-01-05".to_owned()),
            most_active_day_count: 42,
        },
        by_type: vec![
            TypeBreakdown {
                transaction_type: "MONEY_RECEIVED".to_owned(),
                count: 700,
                total_amount: 1_500_000.0,
                avg_amount: 2142.86,
            },
            TypeBreakdown {
                transaction_type: "CASH_POWER".to_owned(),
                count: 550,
                total_amount: 1_000_000.0,
                avg_amount: 1818.18,
            },
        ],
        monthly_trends: vec![
            MonthlyTrend {
                month: "2024-12".to_owned(),
                count: 600,
                total_amount: 1_200_000.0,
                inflow: 800_000.0,
                outflow: 400_000.0,
            },
            MonthlyTrend {
                month: "2025-01".to_owned(),
                count: 650,
                total_amount: 1_300_000.0,
                inflow: 700_000.0,
                outflow: 600_000.0,
            },
        ],
        payment_deposit: vec![
            CategoryTotal {
                category: "Deposits".to_owned(),
                count: 700,
                total_amount: 1_500_000.0,
            },
            CategoryTotal {
                category: "Payments".to_owned(),
                count: 550,
                total_amount: 1_000_000.0,
            },
        ],
    }
}
