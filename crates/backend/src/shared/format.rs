/// Formats a number with thousands separators (commas)
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Turns a field name into words for messages: "igis_code" -> "IGIS code"
pub fn humanize_field(field: &str) -> String {
    let words: Vec<String> = field
        .trim_end_matches("_id")
        .split('_')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, w)| match w {
            "igis" | "cnic" => w.to_uppercase(),
            "no" => "number".to_string(),
            _ if i == 0 => {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            _ => w.to_string(),
        })
        .collect();
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("igis_code"), "IGIS code");
        assert_eq!(humanize_field("takaful_code"), "Takaful code");
        assert_eq!(humanize_field("order_no"), "Order number");
        assert_eq!(humanize_field("email"), "Email");
    }
}
