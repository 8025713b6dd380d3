use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default figure filename with format: emission-{sounding_id}-{YYMMDD}.json
pub fn generate_default_figure_filename(sounding_id: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "emission-{}-{:02}{:02}{:02}.json",
        sounding_id, year, month, day
    );
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_figure_filename() {
        let filename = generate_default_figure_filename("2018082510210384");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));
        assert!(filename_str.contains("emission-2018082510210384-"));
        assert!(filename_str.ends_with(".json"));
    }
}
