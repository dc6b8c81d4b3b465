//! Initial values and validity rules of input elements.

use crate::context::inputs::InputValue;
use crate::schema::*;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Borrowed view over any input element
#[derive(Debug, Clone, Copy)]
pub enum InputRef<'a> {
    Text(&'a TextInput),
    Number(&'a NumberInput),
    Date(&'a DateInput),
    Time(&'a TimeInput),
    Toggle(&'a ToggleInput),
    ChoiceSet(&'a ChoiceSetInput),
}

impl<'a> InputRef<'a> {
    pub fn from_element(element: &'a Element) -> Option<Self> {
        match element {
            Element::TextInput(i) => Some(InputRef::Text(i)),
            Element::NumberInput(i) => Some(InputRef::Number(i)),
            Element::DateInput(i) => Some(InputRef::Date(i)),
            Element::TimeInput(i) => Some(InputRef::Time(i)),
            Element::ToggleInput(i) => Some(InputRef::Toggle(i)),
            Element::ChoiceSetInput(i) => Some(InputRef::ChoiceSet(i)),
            _ => None,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            InputRef::Text(i) => &i.id,
            InputRef::Number(i) => &i.id,
            InputRef::Date(i) => &i.id,
            InputRef::Time(i) => &i.id,
            InputRef::Toggle(i) => &i.id,
            InputRef::ChoiceSet(i) => &i.id,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            InputRef::Text(i) => i.is_required,
            InputRef::Number(i) => i.is_required,
            InputRef::Date(i) => i.is_required,
            InputRef::Time(i) => i.is_required,
            InputRef::Toggle(i) => i.is_required,
            InputRef::ChoiceSet(i) => i.is_required,
        }
    }

    /// Value registered when the element mounts
    pub fn initial_value(&self) -> InputValue {
        match self {
            InputRef::Text(i) => InputValue::from(i.value.clone().unwrap_or_default()),
            InputRef::Number(i) => InputValue::from(i.value.map(|v| v.to_string()).unwrap_or_default()),
            InputRef::Date(i) => InputValue::from(i.value.clone().unwrap_or_default()),
            InputRef::Time(i) => InputValue::from(i.value.clone().unwrap_or_default()),
            InputRef::Toggle(i) => {
                if i.value.as_deref() == Some(i.value_on()) {
                    InputValue::from(i.value_on())
                } else {
                    InputValue::from(i.value_off())
                }
            }
            InputRef::ChoiceSet(i) => {
                let raw = i.value.clone().unwrap_or_default();
                if i.is_multi_select {
                    InputValue::Multi(split_selections(&raw))
                } else {
                    InputValue::Single(raw)
                }
            }
        }
    }

    /// True when `value` fails this element's rules
    pub fn is_invalid(&self, value: &InputValue) -> bool {
        match self {
            InputRef::Text(i) => text_invalid(i, &value.to_string()),
            InputRef::Number(i) => number_invalid(i, &value.to_string()),
            InputRef::Date(i) => date_invalid(i, &value.to_string()),
            InputRef::Time(i) => time_invalid(i, &value.to_string()),
            InputRef::Toggle(i) => i.is_required && value.to_string() != i.value_on(),
            InputRef::ChoiceSet(i) => choice_set_invalid(i, value),
        }
    }
}

fn text_invalid(input: &TextInput, value: &str) -> bool {
    if value.trim().is_empty() {
        return input.is_required;
    }
    if let Some(max) = input.max_length {
        if value.chars().count() > max {
            return true;
        }
    }
    match input.regex.as_deref().filter(|r| !r.is_empty()) {
        Some(pattern) => match Regex::new(pattern) {
            Ok(re) => !re.is_match(value),
            Err(e) => {
                log::warn!("input '{}' has an unusable regex: {}", input.id, e);
                false
            }
        },
        None => false,
    }
}

fn number_invalid(input: &NumberInput, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return input.is_required;
    }
    let number = match value.parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => return true,
    };
    input.min.is_some_and(|min| number < min) || input.max.is_some_and(|max| number > max)
}

fn date_invalid(input: &DateInput, value: &str) -> bool {
    if value.is_empty() {
        return input.is_required;
    }
    let Some(date) = parse_date(value) else {
        return true;
    };
    let min = input.min.as_deref().and_then(parse_date);
    let max = input.max.as_deref().and_then(parse_date);
    min.is_some_and(|min| date < min) || max.is_some_and(|max| date > max)
}

fn time_invalid(input: &TimeInput, value: &str) -> bool {
    if value.is_empty() {
        return input.is_required;
    }
    let Some(time) = parse_time(value) else {
        return true;
    };
    let min = input.min.as_deref().and_then(parse_time);
    let max = input.max.as_deref().and_then(parse_time);
    min.is_some_and(|min| time < min) || max.is_some_and(|max| time > max)
}

fn choice_set_invalid(input: &ChoiceSetInput, value: &InputValue) -> bool {
    if !input.is_required {
        return false;
    }
    match value {
        InputValue::Multi(selected) => !selected.iter().any(|v| input.has_choice(v)),
        InputValue::Single(selected) if input.is_multi_select => {
            !split_selections(selected).iter().any(|v| input.has_choice(v))
        }
        InputValue::Single(selected) => {
            if input.style == ChoiceSetStyle::Compact && selected.is_empty() {
                false
            } else {
                !input.has_choice(selected)
            }
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Date the picker opens on: the value clamped into `[min, max]`, else `max`,
/// else `today`
pub fn initial_picker_date(input: &DateInput, today: NaiveDate) -> NaiveDate {
    let min = input.min.as_deref().and_then(parse_date);
    let max = input.max.as_deref().and_then(parse_date);

    match input.value.as_deref().and_then(parse_date) {
        Some(date) => {
            if let Some(min) = min.filter(|min| date < *min) {
                return min;
            }
            if let Some(max) = max.filter(|max| date > *max) {
                return max;
            }
            date
        }
        None => max.unwrap_or(today),
    }
}

/// Comma-separated multi-select value → selections
pub fn split_selections(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check or uncheck `choice`; the result is sorted
pub fn toggle_choice(current: &[String], choice: &str) -> Vec<String> {
    let mut next: Vec<String> = current.to_vec();
    match next.iter().position(|v| v == choice) {
        Some(index) => {
            next.remove(index);
        }
        None => next.push(choice.to_string()),
    }
    next.sort();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(value: serde_json::Value) -> Element {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_required_text_empty_is_invalid() {
        let e = element(json!({ "type": "Input.Text", "id": "name", "isRequired": true }));
        let input = InputRef::from_element(&e).unwrap();
        assert!(input.is_invalid(&input.initial_value()));
        assert!(!input.is_invalid(&InputValue::from("Ada")));
    }

    #[test]
    fn test_text_regex_and_max_length() {
        let e = element(json!({ "type": "Input.Text", "id": "zip", "regex": "^[0-9]{5}$", "maxLength": 5 }));
        let input = InputRef::from_element(&e).unwrap();
        assert!(!input.is_invalid(&InputValue::from("12345")));
        assert!(input.is_invalid(&InputValue::from("12a45")));
        assert!(input.is_invalid(&InputValue::from("123456")));
        // optional and empty
        assert!(!input.is_invalid(&InputValue::from("")));
    }

    #[test]
    fn test_number_range() {
        let e = element(json!({ "type": "Input.Number", "id": "qty", "min": 1, "max": 10, "value": 3 }));
        let input = InputRef::from_element(&e).unwrap();
        assert_eq!(input.initial_value(), InputValue::from("3"));
        assert!(!input.is_invalid(&InputValue::from("3")));
        assert!(input.is_invalid(&InputValue::from("11")));
        assert!(input.is_invalid(&InputValue::from("abc")));
    }

    #[test]
    fn test_number_rejects_non_finite() {
        let e = element(json!({ "type": "Input.Number", "id": "qty", "min": 1, "max": 3 }));
        let input = InputRef::from_element(&e).unwrap();
        assert!(input.is_invalid(&InputValue::from("NaN")));
        assert!(input.is_invalid(&InputValue::from("inf")));
        assert!(input.is_invalid(&InputValue::from("-infinity")));
        assert!(!input.is_invalid(&InputValue::from("2")));
    }

    #[test]
    fn test_date_range() {
        let e = element(json!({ "type": "Input.Date", "id": "d", "min": "2024-01-01", "max": "2024-12-31" }));
        let input = InputRef::from_element(&e).unwrap();
        assert!(!input.is_invalid(&InputValue::from("2024-06-15")));
        assert!(input.is_invalid(&InputValue::from("2025-01-01")));
        assert!(input.is_invalid(&InputValue::from("15/06/2024")));
    }

    #[test]
    fn test_time_range() {
        let e = element(json!({ "type": "Input.Time", "id": "t", "min": "09:00", "max": "17:00" }));
        let input = InputRef::from_element(&e).unwrap();
        assert!(!input.is_invalid(&InputValue::from("12:30")));
        assert!(input.is_invalid(&InputValue::from("18:00")));
    }

    #[test]
    fn test_initial_picker_date_clamps() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let input: DateInput = serde_json::from_value(json!({
            "id": "d", "value": "2023-05-05", "min": "2024-01-01", "max": "2024-12-31"
        }))
        .unwrap();
        assert_eq!(format_date(initial_picker_date(&input, today)), "2024-01-01");

        let input: DateInput = serde_json::from_value(json!({ "id": "d", "max": "2024-12-31" })).unwrap();
        assert_eq!(format_date(initial_picker_date(&input, today)), "2024-12-31");

        let input: DateInput = serde_json::from_value(json!({ "id": "d" })).unwrap();
        assert_eq!(initial_picker_date(&input, today), today);
    }

    #[test]
    fn test_toggle_values() {
        let e = element(json!({ "type": "Input.Toggle", "id": "agree", "title": "Agree", "value": "yes", "valueOn": "yes", "valueOff": "no", "isRequired": true }));
        let input = InputRef::from_element(&e).unwrap();
        assert_eq!(input.initial_value(), InputValue::from("yes"));
        assert!(input.is_invalid(&InputValue::from("no")));
    }

    #[test]
    fn test_required_single_choice() {
        let e = element(json!({
            "type": "Input.ChoiceSet", "id": "c", "isRequired": true,
            "choices": [{ "title": "Red", "value": "red" }]
        }));
        let input = InputRef::from_element(&e).unwrap();
        // compact and empty is not an error
        assert!(!input.is_invalid(&InputValue::from("")));
        assert!(input.is_invalid(&InputValue::from("blue")));
        assert!(!input.is_invalid(&InputValue::from("red")));
    }

    #[test]
    fn test_required_expanded_choice_empty_is_invalid() {
        let e = element(json!({
            "type": "Input.ChoiceSet", "id": "c", "isRequired": true, "style": "expanded",
            "choices": [{ "title": "Red", "value": "red" }]
        }));
        let input = InputRef::from_element(&e).unwrap();
        assert!(input.is_invalid(&InputValue::from("")));
    }

    #[test]
    fn test_required_multi_choice() {
        let e = element(json!({
            "type": "Input.ChoiceSet", "id": "c", "isRequired": true, "isMultiSelect": true,
            "value": "red,green",
            "choices": [{ "title": "Red", "value": "red" }, { "title": "Blue", "value": "blue" }]
        }));
        let input = InputRef::from_element(&e).unwrap();
        assert_eq!(
            input.initial_value(),
            InputValue::Multi(vec!["red".to_string(), "green".to_string()])
        );
        assert!(!input.is_invalid(&input.initial_value()));
        assert!(input.is_invalid(&InputValue::Multi(vec!["green".to_string()])));
        assert!(input.is_invalid(&InputValue::Multi(vec![])));
    }

    #[test]
    fn test_toggle_choice_sorted() {
        let current = vec!["red".to_string()];
        let next = toggle_choice(&current, "blue");
        assert_eq!(next, vec!["blue".to_string(), "red".to_string()]);
        let next = toggle_choice(&next, "red");
        assert_eq!(next, vec!["blue".to_string()]);
    }
}
