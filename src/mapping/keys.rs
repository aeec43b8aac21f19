//! Tastencodes für Keyboard-Slots
//!
//! Keyboard-Slots speichern X11-Keysyms. Druckbare Latin-1 Zeichen entsprechen
//! direkt ihrem Zeichencode, Sondertasten liegen im Bereich 0xff00..=0xffff.

use crate::mapping::MappingError;

/// Benannte Sondertasten (Keysym, Name)
const NAMED_KEYS: &[(i32, &str)] = &[
    (0x0020, "space"),
    (0x0027, "apostrophe"),
    (0x002c, "comma"),
    (0x002d, "minus"),
    (0x002e, "period"),
    (0x002f, "slash"),
    (0x003b, "semicolon"),
    (0x003d, "equal"),
    (0x005b, "bracketleft"),
    (0x005c, "backslash"),
    (0x005d, "bracketright"),
    (0x0060, "grave"),
    (0xff08, "BackSpace"),
    (0xff09, "Tab"),
    (0xff0d, "Return"),
    (0xff13, "Pause"),
    (0xff14, "Scroll_Lock"),
    (0xff1b, "Escape"),
    (0xff50, "Home"),
    (0xff51, "Left"),
    (0xff52, "Up"),
    (0xff53, "Right"),
    (0xff54, "Down"),
    (0xff55, "Prior"),
    (0xff56, "Next"),
    (0xff57, "End"),
    (0xff61, "Print"),
    (0xff63, "Insert"),
    (0xff67, "Menu"),
    (0xff7f, "Num_Lock"),
    (0xff8d, "KP_Enter"),
    (0xffaa, "KP_Multiply"),
    (0xffab, "KP_Add"),
    (0xffad, "KP_Subtract"),
    (0xffae, "KP_Decimal"),
    (0xffaf, "KP_Divide"),
    (0xffe1, "Shift_L"),
    (0xffe2, "Shift_R"),
    (0xffe3, "Control_L"),
    (0xffe4, "Control_R"),
    (0xffe5, "Caps_Lock"),
    (0xffe9, "Alt_L"),
    (0xffea, "Alt_R"),
    (0xffeb, "Super_L"),
    (0xffec, "Super_R"),
    (0xffff, "Delete"),
];

const KEYPAD_DIGITS: std::ops::RangeInclusive<i32> = 0xffb0..=0xffb9;
const FUNCTION_KEYS: std::ops::RangeInclusive<i32> = 0xffbe..=0xffc9;

/// Liefert den Keysym-Namen zu einem Tastencode
pub fn keycode_to_name(code: i32) -> Option<String> {
    if let Some((_, name)) = NAMED_KEYS.iter().find(|(c, _)| *c == code) {
        return Some((*name).to_string());
    }

    if KEYPAD_DIGITS.contains(&code) {
        return Some(format!("KP_{}", code - KEYPAD_DIGITS.start()));
    }

    if FUNCTION_KEYS.contains(&code) {
        return Some(format!("F{}", code - FUNCTION_KEYS.start() + 1));
    }

    // Restliche druckbare ASCII-Zeichen: Ziffern, Buchstaben, Satzzeichen
    match u8::try_from(code) {
        Ok(byte) if byte.is_ascii_graphic() => Some((byte as char).to_string()),
        _ => None,
    }
}

/// Sucht den Tastencode zu einem Keysym-Namen (Groß-/Kleinschreibung egal)
pub fn name_to_keycode(name: &str) -> Result<i32, MappingError> {
    if let Some((code, _)) = NAMED_KEYS
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
    {
        return Ok(*code);
    }

    let upper = name.to_ascii_uppercase();
    if let Some(number) = upper.strip_prefix("KP_").and_then(|n| n.parse::<i32>().ok()) {
        if (0..=9).contains(&number) {
            return Ok(KEYPAD_DIGITS.start() + number);
        }
    }
    if let Some(number) = upper.strip_prefix('F').and_then(|n| n.parse::<i32>().ok()) {
        if (1..=12).contains(&number) {
            return Ok(FUNCTION_KEYS.start() + number - 1);
        }
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_graphic() => Ok(ch.to_ascii_lowercase() as i32),
        _ => Err(MappingError::UnknownKeyName(name.to_string())),
    }
}
