use super::mention::{InputSegment, Mention, MentionSpan};

/// Split raw search text into ordered segments.
///
/// Text outside mention spans is split on whitespace, one segment per
/// word. Text covered by a span becomes a single segment carrying the
/// mention payload, with the covered substring preserved as `raw_value`
/// so the text box can be redisplayed verbatim.
///
/// Pure function of text + mention list; no network access.
pub fn tokenize(text: &str, mentions: &[MentionSpan]) -> Vec<InputSegment> {
    let mut spans: Vec<&MentionSpan> = mentions.iter().collect();
    spans.sort_by_key(|span| span.start);

    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for span in spans {
        let valid = span.start >= cursor
            && span.end <= text.len()
            && span.start <= span.end
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end);
        if !valid {
            continue;
        }

        push_words(&text[cursor..span.start], &mut segments);
        let raw = &text[span.start..span.end];
        segments.push(mention_segment(raw, span.mention.clone()));
        cursor = span.end;
    }

    push_words(&text[cursor..], &mut segments);
    segments
}

fn mention_segment(raw: &str, mention: Mention) -> InputSegment {
    InputSegment {
        word: raw.to_string(),
        mention: Some(mention),
        raw_value: raw.to_string(),
    }
}

fn push_words(chunk: &str, segments: &mut Vec<InputSegment>) {
    for word in chunk.split_whitespace() {
        segments.push(InputSegment {
            word: word.to_string(),
            mention: None,
            raw_value: word.to_string(),
        });
    }
}
