/// Short reflective message shown after an entry is recorded.
pub fn reflection_for(emotion: &str) -> &'static str {
    match emotion.trim().to_ascii_lowercase().as_str() {
        "joy" => "Sounds like a good day! Keep the positive energy flowing.",
        "sadness" => "It's okay to feel down. Tomorrow is a new chance.",
        "anger" => "Rough day? Maybe a deep breath and music can help.",
        "fear" => "Anxiety is valid. Try grounding yourself, you're safe now.",
        "surprise" => "Something unexpected? Embrace the unknown.",
        "neutral" => "A calm day can be beautiful in its own way.",
        _ => "Emotions make us human. Embrace yours today.",
    }
}
