use absensi_report::{page_window, DashboardStats, FilteredPage, PageItem};

use super::OutputFormat;

pub fn format_stats(stats: &DashboardStats, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(stats).unwrap_or_default();
            out.push('\n');
            out
        }
        OutputFormat::Text => format_stats_text(stats),
    }
}

fn format_stats_text(stats: &DashboardStats) -> String {
    let mut out = String::new();
    out.push_str("Dashboard Absensi\n");
    out.push_str("=================\n");
    out.push_str(&format!("Total siswa:        {}\n", stats.total_students));
    out.push_str(&format!("Absensi hari ini:   {}\n", stats.today_count));
    out.push('\n');
    out.push_str("Status:\n");
    out.push_str(&format!("  Hadir: {}\n", stats.status.hadir));
    out.push_str(&format!("  Izin:  {}\n", stats.status.izin));
    out.push_str(&format!("  Sakit: {}\n", stats.status.sakit));
    out.push_str(&format!("  Alpha: {}\n", stats.status.alpha));
    out.push('\n');
    out.push_str("Gender:\n");
    out.push_str(&format!("  Putra: {}\n", stats.gender.putra));
    out.push_str(&format!("  Putri: {}\n", stats.gender.putri));
    out
}

pub fn format_record_page(page: &FilteredPage<'_>, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(page).unwrap_or_default();
            out.push('\n');
            out
        }
        OutputFormat::Text => format_record_page_text(page),
    }
}

fn format_record_page_text(page: &FilteredPage<'_>) -> String {
    if page.records.is_empty() {
        return "Tidak ada data yang ditemukan\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<24} {:<8} {:<8} {:<8} {:<12} {:<5}\n",
        "No", "Nama", "Kelas", "Gender", "Status", "Tanggal", "Waktu"
    ));
    for (offset, record) in page.records.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<24} {:<8} {:<8} {:<8} {:<12} {:<5}\n",
            page.start_index + offset,
            record.name,
            record.class,
            record.gender,
            record.status,
            record.date,
            record.time.format("%H:%M"),
        ));
    }

    let shown_to = page.start_index + page.records.len() - 1;
    out.push('\n');
    out.push_str(&format!(
        "Menampilkan {} - {} dari {} data\n",
        page.start_index, shown_to, page.total_filtered
    ));
    if page.total_pages > 1 {
        out.push_str(&format!(
            "Halaman: {}\n",
            format_page_window(page.page, page.total_pages)
        ));
    }
    out
}

fn format_page_window(current: u32, total: u32) -> String {
    page_window(current, total)
        .iter()
        .map(|item| match item {
            PageItem::Page(p) if *p == current => format!("[{p}]"),
            PageItem::Page(p) => p.to_string(),
            PageItem::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
