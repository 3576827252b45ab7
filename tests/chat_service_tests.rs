use pretty_assertions::assert_eq;
use rstest::rstest;
use serenibot::{
    Error,
    chat::{ChatService, ReplySettings},
    sentiment::{LabelMap, Sentiment},
};
use std::{collections::HashMap, sync::Arc};

mod common;

use common::{
    FALLBACK_REPLY, create_service,
    mocks::{MockClassifier, MockLlmClient, create_response},
};

#[rstest]
#[case("LABEL_0", Sentiment::Positive)]
#[case("LABEL_1", Sentiment::Neutral)]
#[case("LABEL_2", Sentiment::Negative)]
#[case("LABEL_7", Sentiment::Neutral)]
#[tokio::test]
async fn test_label_is_remapped(#[case] raw: &str, #[case] expected: Sentiment) {
    let service = create_service(
        Arc::new(MockClassifier::with_label(raw)),
        Arc::new(MockLlmClient::replying("I'm here for you.")),
    );

    let reply = service.respond("Today was a lot.").await.unwrap();

    assert_eq!(reply.sentiment, expected);
    assert_eq!(reply.response, "I'm here for you.");
}

#[tokio::test]
async fn test_prompt_sent_to_llm() {
    let llm = Arc::new(MockLlmClient::replying("That sounds really hard."));
    let service = create_service(Arc::new(MockClassifier::with_label("LABEL_2")), llm.clone());

    service.respond("I failed my exam").await.unwrap();

    let requests = llm.get_requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.max_tokens, Some(200));
    assert_eq!(request.temperature, Some(0.8));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(
        request.messages[0].content,
        "You are a supportive mental health chatbot."
    );
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(
        request.messages[1].content,
        "\nYou are SereniBot, a compassionate mental health chatbot.\n\
         The user seems to be feeling negative.\n\
         Respond kindly and empathetically.\n\n\
         User: \"I failed my exam\"\n\
         SereniBot:"
    );
}

#[tokio::test]
async fn test_reply_is_trimmed() {
    let service = create_service(
        Arc::new(MockClassifier::with_label("LABEL_0")),
        Arc::new(MockLlmClient::replying("\n  Glad to hear it!  \n")),
    );

    let reply = service.respond("I got the job!").await.unwrap();
    assert_eq!(reply.response, "Glad to hear it!");
}

#[tokio::test]
async fn test_empty_text_is_rejected_before_classification() {
    let classifier = Arc::new(MockClassifier::with_label("LABEL_0"));
    let llm = Arc::new(MockLlmClient::new());
    let service = create_service(classifier.clone(), llm.clone());

    let result = service.respond("").await;

    assert!(matches!(result, Err(Error::EmptyInput)));
    assert!(classifier.get_inputs().is_empty());
    assert!(llm.get_requests().is_empty());
}

#[tokio::test]
async fn test_classifier_failure_is_an_error() {
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let service = create_service(Arc::new(MockClassifier::failing("model not loaded")), llm.clone());

    let result = service.respond("hello").await;

    assert!(matches!(result, Err(Error::Classifier(_))));
    assert!(llm.get_requests().is_empty());
}

#[tokio::test]
async fn test_llm_failure_uses_fallback_reply() {
    let service = create_service(
        Arc::new(MockClassifier::with_label("LABEL_1")),
        Arc::new(MockLlmClient::new().with_error("connection refused".to_string())),
    );

    let reply = service.respond("just checking in").await.unwrap();

    assert_eq!(reply.sentiment, Sentiment::Neutral);
    assert_eq!(reply.response, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_empty_completion_uses_fallback_reply() {
    let llm = MockLlmClient::new();
    let mut response = create_response("");
    response.choices.clear();
    llm.add_response(response);

    let service = create_service(Arc::new(MockClassifier::with_label("LABEL_0")), Arc::new(llm));

    let reply = service.respond("hi").await.unwrap();
    assert_eq!(reply.response, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_custom_labels_and_settings() {
    let labels = LabelMap::new(HashMap::from([
        ("joy".to_string(), Sentiment::Positive),
        ("sadness".to_string(), Sentiment::Negative),
    ]));
    let settings = ReplySettings {
        persona: "Willow".to_string(),
        fallback_reply: "Let's try again in a moment.".to_string(),
        ..ReplySettings::default()
    };
    let llm = Arc::new(MockLlmClient::new().with_error("timeout".to_string()));
    let service = ChatService::new(
        Arc::new(MockClassifier::with_label("sadness")),
        llm.clone(),
        labels,
        settings,
    );

    let reply = service.respond("I miss my dog").await.unwrap();

    assert_eq!(reply.sentiment, Sentiment::Negative);
    assert_eq!(reply.response, "Let's try again in a moment.");
    assert!(llm.get_requests()[0].messages[1].content.ends_with("\nWillow:"));
}
