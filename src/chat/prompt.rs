use crate::sentiment::Sentiment;

/// Renders the sentiment-annotated prompt sent as the user message.
pub fn build(persona: &str, sentiment: Sentiment, text: &str) -> String {
    format!(
        "\nYou are {persona}, a compassionate mental health chatbot.\n\
         The user seems to be feeling {sentiment}.\n\
         Respond kindly and empathetically.\n\
         \n\
         User: \"{text}\"\n\
         {persona}:"
    )
}
