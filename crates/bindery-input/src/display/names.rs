/// Human-readable name for a control path (`"leftShift"` → `"Left Shift"`,
/// `"leftStick/up"` → `"Left Stick/Up"`).
pub fn control_display_name(control_path: &str) -> String {
    control_path
        .split('/')
        .map(segment_display_name)
        .collect::<Vec<_>>()
        .join("/")
}

/// Human-readable name for a composite part (`"up"` → `"Up"`).
pub fn part_display_name(part: &str) -> String {
    segment_display_name(part)
}

/// Human-readable name for a device layout (`"DualShockGamepad"` stays as is,
/// `"keyboard"` → `"Keyboard"`).
pub fn layout_display_name(layout: &str) -> String {
    capitalize(layout)
}

fn segment_display_name(segment: &str) -> String {
    match segment.to_ascii_lowercase().as_str() {
        "escape" => return "Esc".into(),
        "leftarrow" => return "Left Arrow".into(),
        "rightarrow" => return "Right Arrow".into(),
        "uparrow" => return "Up Arrow".into(),
        "downarrow" => return "Down Arrow".into(),
        "numpadenter" => return "Numpad Enter".into(),
        "leftbutton" => return "LMB".into(),
        "rightbutton" => return "RMB".into(),
        "middlebutton" => return "MMB".into(),
        _ => {}
    }
    split_words(segment)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits camelCase and word/digit boundaries: `"numpad1Press"` →
/// `["numpad", "1", "Press"]`. Function keys stay whole (`"f12"`).
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in s.chars() {
        let boundary = match prev {
            Some(p) => {
                (p.is_lowercase() && c.is_uppercase())
                    || (p.is_alphabetic() && c.is_ascii_digit() && current.len() > 1)
                    || (p.is_ascii_digit() && c.is_alphabetic())
            }
            None => false,
        };
        if c == '_' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
