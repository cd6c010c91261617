//! Aggregation scenarios and property-based tests for the analytics module.

use bookgx_shared::ParseMode;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::breakdown::Breakdown;
use super::clean::clean_amount;
use super::date::DateRange;
use super::error::AnalyticsError;
use super::funnel::FunnelCounts;
use super::service::AnalyticsService;
use super::types::{AnalyticsOptions, DashboardData, DataSource};
use crate::records::{BookingRecord, SheetTable, parse_csv_line};

fn booking(status: &str, total: &str) -> BookingRecord {
    BookingRecord::from_pairs([("Booking Status", status), ("Total Book", total)])
}

fn build(bookings: &[BookingRecord]) -> DashboardData {
    AnalyticsService::build_dashboard(bookings, &DateRange::all(), &AnalyticsOptions::default())
        .unwrap()
}

fn from_csv(csv: &str) -> Vec<BookingRecord> {
    SheetTable::from_csv(csv)
        .into_records()
        .into_iter()
        .map(BookingRecord::from)
        .collect()
}

#[test]
fn test_revenue_by_status_and_total() {
    let data = build(&[
        booking("Confirmed", "1,000"),
        booking("Confirmed", "500"),
        booking("Canceled", "200"),
    ]);
    let stats = data.stats.unwrap();

    assert_eq!(stats.revenue_by_status.len(), 2);
    assert_eq!(stats.revenue_by_status["Confirmed"], dec!(1500));
    assert_eq!(stats.revenue_by_status["Canceled"], dec!(200));
    assert_eq!(stats.total_revenue, dec!(1700));
    assert_eq!(data.record_count, 3);
    assert_eq!(data.booking_statuses["Confirmed"], 2);
}

#[test]
fn test_empty_dataset_yields_zeroed_aggregates() {
    let data = build(&[]);
    let stats = data.stats.as_ref().unwrap();

    assert_eq!(data.record_count, 0);
    assert_eq!(stats.total_revenue, dec!(0));
    assert_eq!(stats.avg_order_value, dec!(0));
    assert_eq!(stats.conversion_rate, dec!(0));
    assert!(stats.location_data.is_empty());
    assert!(data.revenue.as_ref().unwrap().is_empty());
    assert_eq!(data.performance.as_ref().unwrap().average_order_value, dec!(0));
    assert_eq!(data.data_source, DataSource::GoogleSheets);
}

#[test]
fn test_blank_categories_group_as_unknown() {
    let bookings = from_csv(
        "Location,How did you know us ?,Nature Booking,Booking Status,Total Book\n\
         ,,,Confirmed,100\n\
         Riyadh,Instagram,Wedding,,300\n",
    );
    let data = build(&bookings);
    let stats = data.stats.unwrap();

    assert_eq!(data.location_breakdown["Unknown"], dec!(100));
    assert_eq!(data.acquisition_channels["Unknown"], 1);
    assert_eq!(stats.nature_booking["Unknown"], "50.0");
    assert_eq!(data.booking_statuses["Unknown"], 1);
    assert_eq!(stats.location_data[0].name, "Riyadh");
}

#[test]
fn test_scalars_and_funnel() {
    let bookings = from_csv(
        "Client Name,Booking Status,Total Book,Total Paid,Total Book Plus,Manager Rating,Client Review\n\
         Rana,Completed,1000,1000,200,5,\n\
         Rana,Confirmed,500,250,,,Great\n\
         Omar,cancelled,300,,,,\n\
         ,Completed,200,200,,4,\n",
    );
    let data = build(&bookings);
    let stats = data.stats.as_ref().unwrap();

    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.avg_order_value, dec!(500));
    assert_eq!(stats.conversion_rate, dec!(50));
    assert_eq!(stats.total_reviews, 3);
    assert_eq!(stats.reviews_by_status["Completed"], 2);

    let funnel: Vec<u64> = data.conversion.as_ref().unwrap().iter().map(|s| s.users).collect();
    assert_eq!(funnel, vec![4u64, 1, 2, 3, 2]);

    let performance = data.performance.as_ref().unwrap();
    assert_eq!(performance.payment_completion_rate, dec!(75));
    assert_eq!(performance.cancellation_rate, dec!(25));
    assert_eq!(performance.upsell_rate, dec!(25));
    assert_eq!(performance.average_order_value, dec!(500));
    // (75 + 100 + 50 + 50) / 4 = 68.75
    assert_eq!(data.business_health, 69);
}

#[test]
fn test_payment_methods_are_cleaned_sums() {
    let bookings = from_csv(
        "Cash,Mada,Tabby,Tamara,Bank Transfer\n\
         \"1,000\",200,,50,'300'\n\
         500,,100,,\n",
    );
    let payments = build(&bookings).payment_methods;

    assert_eq!(payments.cash, dec!(1500));
    assert_eq!(payments.mada, dec!(200));
    assert_eq!(payments.tabby, dec!(100));
    assert_eq!(payments.tamara, dec!(50));
    assert_eq!(payments.bank_transfer, dec!(300));
}

#[test]
fn test_lenient_mode_counts_malformed_amounts() {
    let data = build(&[
        booking("Confirmed", "pending"),
        booking("Confirmed", "400 SAR"),
        booking("Confirmed", ""),
    ]);

    assert_eq!(data.data_quality.malformed_amounts, 2);
    assert_eq!(data.stats.unwrap().total_revenue, dec!(400));
}

#[test]
fn test_strict_mode_rejects_first_malformed_amount() {
    let options = AnalyticsOptions {
        parse_mode: ParseMode::Strict,
    };
    let err = AnalyticsService::build_dashboard(
        &[booking("Confirmed", "100"), booking("Confirmed", "1O0")],
        &DateRange::all(),
        &options,
    )
    .unwrap_err();

    assert_eq!(
        err,
        AnalyticsError::MalformedAmount {
            row: 2,
            column: "Total Book".to_string(),
            value: "1O0".to_string(),
        }
    );
}

#[test]
fn test_oversized_amounts_are_malformed_not_fatal() {
    let data = build(&[
        booking("Confirmed", "1e27"),
        booking("Confirmed", "79228162514264337593543950335"),
        booking("Confirmed", "79228162514264337593543950335"),
        booking("Completed", "250"),
    ]);
    let stats = data.stats.unwrap();

    assert_eq!(data.record_count, 4);
    assert_eq!(data.data_quality.malformed_amounts, 3);
    assert_eq!(stats.total_revenue, dec!(250));
    assert_eq!(stats.revenue_by_status["Confirmed"], dec!(0));
    assert_eq!(stats.location_data[0].percentage, dec!(100));
}

#[test]
fn test_strict_mode_rejects_oversized_amount() {
    let options = AnalyticsOptions {
        parse_mode: ParseMode::Strict,
    };
    let err = AnalyticsService::build_dashboard(
        &[booking("Confirmed", "1e27")],
        &DateRange::all(),
        &options,
    )
    .unwrap_err();

    assert!(matches!(err, AnalyticsError::MalformedAmount { row: 1, .. }));
}

#[test]
fn test_status_spellings_group_together() {
    let data = build(&[
        booking("Canceled", "100"),
        booking("Cancelled", "200"),
        booking(" cancelled ", "300"),
        booking("confirmed", "50"),
        booking("No Show", "10"),
    ]);
    let stats = data.stats.unwrap();

    assert_eq!(data.booking_statuses.len(), 3);
    assert_eq!(data.booking_statuses["Canceled"], 3);
    assert_eq!(data.booking_statuses["Confirmed"], 1);
    assert_eq!(data.booking_statuses["No Show"], 1);
    assert_eq!(stats.revenue_by_status["Canceled"], dec!(600));
    assert_eq!(stats.status_pie_data[0].name, "Canceled");
    assert_eq!(stats.status_pie_data[0].value, dec!(3));
    assert_eq!(data.performance.unwrap().cancellation_rate, dec!(60));
}

#[test]
fn test_strict_mode_accepts_blank_amounts() {
    let options = AnalyticsOptions {
        parse_mode: ParseMode::Strict,
    };
    let result =
        AnalyticsService::build_dashboard(&[booking("Confirmed", "")], &DateRange::all(), &options);
    assert!(result.is_ok());
}

#[test]
fn test_range_filters_and_undated_records() {
    let bookings = from_csv(
        "Booking Date,Total Book\n\
         2024-01-10,100\n\
         2024-02-10,200\n\
         ,300\n",
    );

    let all = build(&bookings);
    assert_eq!(all.record_count, 3);
    assert_eq!(all.data_quality.undated_records, 1);
    assert_eq!(all.revenue.as_ref().unwrap().len(), 2);

    let range = DateRange::from_strings("2024-02-01", "2024-02-29").unwrap();
    let february =
        AnalyticsService::build_dashboard(&bookings, &range, &AnalyticsOptions::default()).unwrap();
    assert_eq!(february.record_count, 1);
    assert_eq!(february.data_quality.undated_records, 0);
    assert_eq!(february.stats.unwrap().total_revenue, dec!(200));
}

#[test]
fn test_dashboard_json_shape() {
    let data = build(&[booking("Confirmed", "100")]).with_source(DataSource::MockData);
    let value = serde_json::to_value(&data).unwrap();

    for key in [
        "revenue",
        "users",
        "conversion",
        "performance",
        "stats",
        "recordCount",
        "currency",
        "locationBreakdown",
        "paymentMethods",
        "acquisitionChannels",
        "bookingStatuses",
        "businessHealth",
        "dataQuality",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["dataSource"], "mock_data");
    assert_eq!(value["currency"], "SAR");
    assert!(value["performance"].get("serverUptime").is_some());
    assert!(value["stats"].get("statusPieData").is_some());
    assert!(value["paymentMethods"].get("bankTransfer").is_some());
    assert!(value["dataQuality"].get("malformedAmounts").is_some());
    assert!(value["stats"]["totalRevenue"].is_number());
}

#[test]
fn test_omitted_sections_are_not_serialized() {
    let mut data = build(&[]);
    data.stats = None;
    data.performance = None;
    let value = serde_json::to_value(&data).unwrap();

    assert!(value.get("stats").is_none());
    assert!(value.get("performance").is_none());
    assert!(value.get("revenue").is_some());
}

fn label_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Riyadh", "Jeddah", "Dammam", "Khobar", "", "Mecca"])
        .prop_map(str::to_string)
}

proptest! {
    /// Breakdown percentages sum to 100 within rounding when the total is
    /// non-zero.
    #[test]
    fn test_breakdown_percentages_sum_to_100(
        entries in prop::collection::vec((label_strategy(), 0u32..100_000), 1..40),
    ) {
        let mut breakdown = Breakdown::new();
        for (label, value) in &entries {
            breakdown.add(label, Decimal::from(*value));
        }

        let sum: Decimal = breakdown.percentages().values().copied().sum();
        if breakdown.total().is_zero() {
            prop_assert!(sum.is_zero());
        } else {
            prop_assert!((sum - dec!(100)).abs() <= dec!(0.5));
        }

        let pie_sum: Decimal = breakdown.pie_slices().iter().map(|s| s.percentage).sum();
        prop_assert_eq!(pie_sum, sum);
    }

    /// Pie slices are sorted by value, descending.
    #[test]
    fn test_pie_slices_descend(
        entries in prop::collection::vec((label_strategy(), 0u32..1_000), 0..30),
    ) {
        let mut breakdown = Breakdown::new();
        for (label, value) in &entries {
            breakdown.add(label, Decimal::from(*value));
        }

        let slices = breakdown.pie_slices();
        prop_assert!(slices.windows(2).all(|pair| pair[0].value >= pair[1].value));
    }

    /// Cleaning an already cleaned amount changes nothing.
    #[test]
    fn test_clean_amount_is_idempotent(raw in "[0-9,'\" .a-z+-]{0,16}") {
        let once = clean_amount(&raw);
        prop_assert_eq!(clean_amount(&once.to_string()), once);
        prop_assert!(once >= Decimal::ZERO);
    }

    /// Thousands separators never change the value.
    #[test]
    fn test_clean_amount_ignores_separators(value in 0u64..10_000_000_000) {
        let plain = value.to_string();
        let grouped: String = plain
            .chars()
            .rev()
            .enumerate()
            .flat_map(|(i, c)| {
                let sep = (i > 0 && i % 3 == 0).then_some(',');
                [sep, Some(c)].into_iter().flatten()
            })
            .collect::<Vec<char>>()
            .into_iter()
            .rev()
            .collect();

        prop_assert_eq!(clean_amount(&grouped), Decimal::from(value));
        prop_assert_eq!(clean_amount(&format!("\"{grouped}\"")), Decimal::from(value));
    }

    /// Quoted cells keep their commas as content.
    #[test]
    fn test_quoted_commas_survive_parsing(
        cells in prop::collection::vec("[A-Za-z0-9][A-Za-z0-9 ,]{0,10}[A-Za-z0-9]", 1..8),
    ) {
        let line = cells
            .iter()
            .map(|cell| format!("\"{cell}\""))
            .collect::<Vec<_>>()
            .join(",");

        prop_assert_eq!(parse_csv_line(&line), cells);
    }

    /// Nested fixtures produce a non-increasing funnel.
    #[test]
    fn test_funnel_non_increasing_over_nested_fixtures(
        (inquiries, confirmed, completed, paid, rated) in (1usize..60)
            .prop_flat_map(|n| (Just(n), 0..=n))
            .prop_flat_map(|(n, c)| (Just(n), Just(c), 0..=c.min(n - c)))
            .prop_flat_map(|(n, c, d)| (Just(n), Just(c), Just(d), 0..=d))
            .prop_flat_map(|(n, c, d, p)| (Just(n), Just(c), Just(d), Just(p), 0..=p)),
    ) {
        let bookings: Vec<BookingRecord> = (0..inquiries)
            .map(|i| {
                let status = if i < completed {
                    "Completed"
                } else if i < completed + confirmed {
                    "Confirmed"
                } else {
                    "Inquiry"
                };
                let paid_amount = if i < paid { "100" } else { "" };
                let rating = if i < rated { "5" } else { "" };
                BookingRecord::from_pairs([
                    ("Booking Status", status),
                    ("Total Book", "100"),
                    ("Total Paid", paid_amount),
                    ("Manager Rating", rating),
                ])
            })
            .collect();

        let data = build(&bookings);
        let stages = data.conversion.unwrap();
        let counts = FunnelCounts {
            inquiries: stages[0].users,
            confirmed: stages[1].users,
            completed: stages[2].users,
            paid: stages[3].users,
            rated: stages[4].users,
        };

        prop_assert!(counts.is_non_increasing());
        prop_assert_eq!(stages[0].users, u64::try_from(inquiries).unwrap());
    }
}
