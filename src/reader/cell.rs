use calamine::Data;
use kwtag_common::CellValue;

/// 日時セルの文字列形式
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// calamineのセル値を照合用のセル値へ変換
pub fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if !dt.is_duration() => {
                CellValue::Text(datetime.format(DATETIME_FORMAT).to_string())
            }
            _ => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
