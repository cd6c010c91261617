//! Built-in sample bookings.
//!
//! Served when the booking sheet cannot be fetched, so the dashboard always
//! has something to render. The rows go through the normal CSV parser.

use crate::records::{BookingRecord, SheetTable};

/// Sample booking sheet in CSV export form.
pub const SAMPLE_BOOKINGS_CSV: &str = r#"Booking Date,Location,Client Name,Booking Status,Total Book,Total Paid,Total Book Plus,Manager Rating,Client Review,Rating,How did you know us ?,Nature Booking,Cash,Mada,Tabby,Tamara,Bank Transfer
2024-01-06,Riyadh,Noura Al-Qahtani,Completed,"4,500","4,500",500,5,Beautiful setup,5,Instagram,Wedding,,"2,000",,,"2,500"
2024-01-14,Jeddah,Faisal Al-Harbi,Completed,"2,800","2,800",,4,,4,Google,Birthday,800,"2,000",,,
2024-01-21,Riyadh,Sara Al-Otaibi,Canceled,"1,200",0,,,,,TikTok,Engagement,,,,,
2024-02-03,Dammam,Khalid Al-Dosari,Completed,"3,600","3,600",400,5,Very professional,5,Referral,Wedding,,"1,600","2,000",,
2024-02-11,Riyadh,Reem Al-Shehri,Confirmed,"2,200","1,100",,,,,Instagram,Photoshoot,,"1,100",,,
2024-02-18,Jeddah,Abdullah Al-Ghamdi,Completed,"5,200","5,200",800,4,,4,Snapchat,Wedding,,,,"2,600","2,600"
2024-02-25,Khobar,Lama Al-Zahrani,Completed,"1,900","1,900",,5,Loved it,5,Instagram,Birthday,900,"1,000",,,
2024-03-02,Riyadh,Mohammed Al-Subaie,Completed,"6,100","6,100","1,000",5,,5,Google,Wedding,,"3,100",,,"3,000"
2024-03-09,Dammam,Hessa Al-Mutairi,Confirmed,"2,400","1,200",,,,,TikTok,Engagement,,,"1,200",,
2024-03-16,Jeddah,Turki Al-Shammari,Canceled,"3,000",0,,,,,Referral,Wedding,,,,,
2024-03-23,Riyadh,Maha Al-Anazi,Completed,"2,700","2,700",300,4,Good service,4,Instagram,Photoshoot,,"2,700",,,
2024-04-04,Mecca,Yousef Al-Rashid,Completed,"3,300","3,300",,5,,5,Google,Birthday,"1,300","2,000",,,
2024-04-12,Riyadh,Nada Al-Juhani,Pending,"1,800",0,,,,,Snapchat,Engagement,,,,,
2024-04-19,Khobar,Saud Al-Malki,Completed,"4,100","4,100",600,5,Excellent,5,Referral,Wedding,,,,"2,100","2,000"
2024-04-27,Jeddah,Amal Al-Amri,Completed,"2,500","2,500",,3,,3,Instagram,Birthday,500,"2,000",,,
2024-05-05,Riyadh,Badr Al-Saud,Confirmed,"5,800","2,900",,,,,Google,Wedding,,"2,900",,,
2024-05-13,Dammam,Rawan Al-Qurashi,Completed,"2,300","2,300",200,4,,4,TikTok,Photoshoot,,"2,300",,,
2024-05-20,Medina,Omar Al-Farsi,Completed,"3,900","3,900",,5,Will book again,5,Referral,Wedding,,"1,900","2,000",,
2024-05-28,Riyadh,Dana Al-Harthi,Cancelled,"1,600",0,,,,,Instagram,Birthday,,,,,
2024-06-03,Jeddah,Majed Al-Hazmi,Completed,"4,700","4,700",700,5,,5,Google,Wedding,"1,700",,,,"3,000"
2024-06-10,Riyadh,Noura Al-Qahtani,Completed,"2,100","2,100",,4,Second visit,4,Referral,Photoshoot,,"2,100",,,
2024-06-17,Khobar,Fahad Al-Bishi,Confirmed,"3,400","1,700",,,,,Snapchat,Engagement,,,,"1,700",
2024-06-24,Mecca,Ghada Al-Sulami,Completed,"2,900","2,900",300,4,,4,Instagram,Birthday,,"2,900",,,
2024-07-01,Riyadh,Ziyad Al-Khaldi,Completed,"6,500","6,500","1,200",5,Outstanding,5,Google,Wedding,,"3,500",,,"3,000"
2024-07-08,Dammam,Latifa Al-Yami,Completed,"2,000","2,000",,4,,4,TikTok,Birthday,"1,000","1,000",,,
2024-07-15,Jeddah,Nasser Al-Harbi,Confirmed,"3,800","1,900",,,,,Referral,Wedding,,"1,900",,,
2024-07-22,Riyadh,Hind Al-Shammari,Completed,"1,700","1,700",,5,Quick and easy,5,Instagram,Photoshoot,,"1,700",,,
2024-07-29,Medina,Sultan Al-Enezi,Canceled,"2,600",0,,,,,Google,Engagement,,,,,
"#;

/// Returns the sample bookings.
#[must_use]
pub fn sample_bookings() -> Vec<BookingRecord> {
    sample_table()
        .into_records()
        .into_iter()
        .map(BookingRecord::from)
        .collect()
}

/// Returns the sample sheet as a table.
#[must_use]
pub fn sample_table() -> SheetTable {
    SheetTable::from_csv(SAMPLE_BOOKINGS_CSV)
}
