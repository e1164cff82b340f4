use anyhow::Result;
use culture_bot::bot::{handle_callback_query, handle_text_message, BotContext, MessagingGateway};
use culture_bot::catalog::Catalog;
use culture_bot::config::BotConfig;
use culture_bot::errors::BotError;
use std::path::PathBuf;
use std::sync::Mutex;
use teloxide::types::{CallbackQueryId, ChatId, InlineKeyboardButtonKind, InlineKeyboardMarkup};

/// A single call made by the handlers to the gateway
#[derive(Debug, Clone)]
enum GatewayCall {
    Text {
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Photo {
        chat_id: ChatId,
        photo: String,
        caption: String,
        keyboard: Option<InlineKeyboardMarkup>,
        html: bool,
    },
    Answer {
        callback_id: String,
    },
}

/// Gateway that records every call and can simulate API failures
#[derive(Default)]
struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    fail_sends: bool,
    fail_answers: bool,
}

impl RecordingGateway {
    fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Default::default()
        }
    }

    fn failing_answers() -> Self {
        Self {
            fail_answers: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn answers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Answer { callback_id } => Some(callback_id),
                _ => None,
            })
            .collect()
    }

    fn replies(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, GatewayCall::Answer { .. }))
            .collect()
    }
}

impl MessagingGateway for RecordingGateway {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        self.record(GatewayCall::Text {
            chat_id,
            text,
            keyboard,
        });
        if self.fail_sends {
            return Err(BotError::Gateway("simulated send failure".to_string()));
        }
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &str,
        caption: String,
        keyboard: Option<InlineKeyboardMarkup>,
        html: bool,
    ) -> Result<(), BotError> {
        self.record(GatewayCall::Photo {
            chat_id,
            photo: photo.to_string(),
            caption,
            keyboard,
            html,
        });
        if self.fail_sends {
            return Err(BotError::Gateway("simulated send failure".to_string()));
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: CallbackQueryId) -> Result<(), BotError> {
        self.record(GatewayCall::Answer {
            callback_id: callback_id.0,
        });
        if self.fail_answers {
            return Err(BotError::Gateway("simulated answer failure".to_string()));
        }
        Ok(())
    }
}

const CHAT: ChatId = ChatId(4242);

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cultural_points.json")
}

fn test_context() -> BotContext {
    let catalog = Catalog::load(fixture_path()).expect("fixture catalog should load");
    BotContext::new(catalog, BotConfig::default())
}

fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
    markup
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    other => panic!("unexpected button kind: {other:?}"),
                })
                .collect()
        })
        .collect()
}

fn main_menu_data() -> Vec<Vec<String>> {
    vec![
        vec!["optionCategory.Библиотеки".to_string(), "optionCategory.Храмы".to_string()],
        vec!["optionCategory.Парки".to_string(), "optionCategory.Музеи".to_string()],
        vec!["optionCategory.Памятники".to_string(), "optionCategory.Театры".to_string()],
    ]
}

fn callback_id(id: &str) -> CallbackQueryId {
    CallbackQueryId(id.to_string())
}

async fn press(gateway: &RecordingGateway, ctx: &BotContext, data: Option<&str>) -> Result<()> {
    handle_callback_query(gateway, ctx, callback_id("cb-1"), CHAT, data, None).await
}

fn single_photo(gateway: &RecordingGateway) -> (String, String, Vec<Vec<String>>, bool) {
    let replies = gateway.replies();
    assert_eq!(replies.len(), 1, "expected exactly one reply: {replies:?}");
    match &replies[0] {
        GatewayCall::Photo {
            chat_id,
            photo,
            caption,
            keyboard,
            html,
        } => {
            assert_eq!(*chat_id, CHAT);
            let keyboard = keyboard.as_ref().expect("point card must carry a keyboard");
            (photo.clone(), caption.clone(), callback_data(keyboard), *html)
        }
        other => panic!("expected a photo, got {other:?}"),
    }
}

fn single_text(gateway: &RecordingGateway) -> (String, Option<Vec<Vec<String>>>) {
    let replies = gateway.replies();
    assert_eq!(replies.len(), 1, "expected exactly one reply: {replies:?}");
    match &replies[0] {
        GatewayCall::Text {
            chat_id,
            text,
            keyboard,
        } => {
            assert_eq!(*chat_id, CHAT);
            (text.clone(), keyboard.as_ref().map(callback_data))
        }
        other => panic!("expected a text, got {other:?}"),
    }
}

#[tokio::test]
async fn test_greeting_in_any_casing_shows_main_menu() -> Result<()> {
    let ctx = test_context();

    for text in ["ПРИВЕТ", "привет", "Привет, бот!", "ну пРиВеТ"] {
        let gateway = RecordingGateway::default();
        handle_text_message(&gateway, &ctx, CHAT, text, Some("Иван"), None).await?;

        let (reply, keyboard) = single_text(&gateway);
        assert!(reply.contains("Здравствуйте, Иван."), "unexpected welcome: {reply}");
        assert!(reply.contains("Культурное Просвещение в Москве"));
        assert_eq!(keyboard, Some(main_menu_data()));
    }

    Ok(())
}

#[tokio::test]
async fn test_start_command_greets_anonymous_user() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    handle_text_message(&gateway, &ctx, CHAT, "/start", None, None).await?;

    let (reply, keyboard) = single_text(&gateway);
    assert!(reply.contains("Здравствуйте, гость."));
    assert!(keyboard.is_some());
    Ok(())
}

#[tokio::test]
async fn test_help_and_fallback_texts() -> Result<()> {
    let ctx = test_context();

    let gateway = RecordingGateway::default();
    handle_text_message(&gateway, &ctx, CHAT, "/HELP please", None, None).await?;
    assert_eq!(single_text(&gateway), ("Напиши привет".to_string(), None));

    let gateway = RecordingGateway::default();
    handle_text_message(&gateway, &ctx, CHAT, "как дела?", None, None).await?;
    assert_eq!(
        single_text(&gateway),
        ("Я тебя не понимаю. Напиши /help".to_string(), None)
    );

    Ok(())
}

#[tokio::test]
async fn test_greeting_wins_over_help() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    handle_text_message(&gateway, &ctx, CHAT, "привет /help", None, None).await?;

    let (_, keyboard) = single_text(&gateway);
    assert_eq!(keyboard, Some(main_menu_data()));
    Ok(())
}

#[tokio::test]
async fn test_category_button_shows_first_point() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    press(&gateway, &ctx, Some("optionCategory.Музеи")).await?;

    let (photo, caption, keyboard, html) = single_photo(&gateway);
    assert_eq!(photo, "https://example.org/pictures/tretyakov.jpg");
    assert!(caption.starts_with("Государственная Третьяковская галерея\n\n"));
    assert!(caption.ends_with("\n\nАдрес: Лаврушинский пер., 10"));
    assert!(html);
    assert_eq!(
        keyboard,
        vec![
            vec!["optionArrow.Музеи.-1".to_string(), "optionArrow.Музеи.1".to_string()],
            vec!["optionBackToMenu".to_string()],
        ]
    );
    assert_eq!(gateway.answers(), vec!["cb-1".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_arrow_wraps_index_past_the_end() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    // Three museums: 5 mod 3 = 2
    press(&gateway, &ctx, Some("optionArrow.Музеи.5")).await?;

    let (photo, caption, keyboard, _) = single_photo(&gateway);
    assert_eq!(photo, "https://example.org/pictures/garage.jpg");
    assert!(caption.contains("&amp; &lt;Лаборатория&gt;"));
    assert!(!caption.contains("<Лаборатория>"));
    assert_eq!(keyboard[0], vec!["optionArrow.Музеи.1", "optionArrow.Музеи.3"]);
    Ok(())
}

#[tokio::test]
async fn test_arrow_wraps_negative_index() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    press(&gateway, &ctx, Some("optionArrow.Музеи.-1")).await?;

    let (photo, _, _, _) = single_photo(&gateway);
    assert_eq!(photo, "https://example.org/pictures/garage.jpg");
    Ok(())
}

#[tokio::test]
async fn test_back_to_menu() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    press(&gateway, &ctx, Some("optionBackToMenu")).await?;

    let (text, keyboard) = single_text(&gateway);
    assert_eq!(
        text,
        "Вы вернулись в основное меню.\n\nВыберите интересующую вас категорию"
    );
    assert_eq!(keyboard, Some(main_menu_data()));
    assert_eq!(gateway.answers().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_malformed_callback_replies_with_error() -> Result<()> {
    let ctx = test_context();

    for data in [Some("optionArrow.Музеи"), Some("optionArrow.Музеи.abc"), Some("nonsense"), None] {
        let gateway = RecordingGateway::default();
        press(&gateway, &ctx, data).await?;

        assert_eq!(single_text(&gateway), ("Неверные данные".to_string(), None));
        assert_eq!(gateway.answers().len(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_category_is_reported_to_user() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    press(&gateway, &ctx, Some("optionCategory.Театры")).await?;

    let (text, keyboard) = single_text(&gateway);
    assert!(text.contains("Театры"));
    assert!(keyboard.is_none());
    assert_eq!(gateway.answers().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_callback_acknowledged_once_when_send_fails() -> Result<()> {
    let ctx = test_context();

    for data in [
        Some("optionCategory.Парки"),
        Some("optionArrow.Музеи.2"),
        Some("optionBackToMenu"),
        Some("broken"),
        Some("optionCategory.Театры"),
    ] {
        let gateway = RecordingGateway::failing_sends();
        press(&gateway, &ctx, data).await?;

        assert_eq!(gateway.answers(), vec!["cb-1".to_string()], "payload {data:?}");
        // The acknowledgment comes after the branch's own reply
        assert!(matches!(
            gateway.calls().last(),
            Some(GatewayCall::Answer { .. })
        ));
    }
    Ok(())
}

#[tokio::test]
async fn test_answer_failure_is_reported_after_single_attempt() {
    let ctx = test_context();
    let gateway = RecordingGateway::failing_answers();

    let result = press(&gateway, &ctx, Some("optionCategory.Музеи")).await;

    assert!(result.is_err());
    assert_eq!(gateway.answers().len(), 1);
    assert_eq!(gateway.replies().len(), 1);
}

#[tokio::test]
async fn test_text_send_failure_is_returned() {
    let ctx = test_context();
    let gateway = RecordingGateway::failing_sends();

    let result = handle_text_message(&gateway, &ctx, CHAT, "привет", None, None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_english_user_gets_english_caption() -> Result<()> {
    let ctx = test_context();
    let gateway = RecordingGateway::default();

    handle_callback_query(&gateway, &ctx, callback_id("cb-2"), CHAT, Some("optionCategory.Парки"), Some("en-GB"))
        .await?;

    let (photo, caption, _, _) = single_photo(&gateway);
    assert_eq!(photo, "pictures/gorky_park.jpg");
    assert!(caption.ends_with("Address: ул. Крымский Вал, 9"));
    assert_eq!(gateway.answers(), vec!["cb-2".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_menu_follows_configured_categories() -> Result<()> {
    let catalog = Catalog::load(fixture_path())?;
    let config = BotConfig {
        menu_categories: vec!["Музеи".to_string(), "Парки".to_string(), "Театры".to_string()],
        menu_columns: 1,
        ..BotConfig::default()
    };
    let ctx = BotContext::new(catalog, config);
    let gateway = RecordingGateway::default();

    handle_text_message(&gateway, &ctx, CHAT, "привет", None, None).await?;

    let (_, keyboard) = single_text(&gateway);
    assert_eq!(
        keyboard,
        Some(vec![
            vec!["optionCategory.Музеи".to_string()],
            vec!["optionCategory.Парки".to_string()],
            vec!["optionCategory.Театры".to_string()],
        ])
    );
    assert_eq!(ctx.empty_menu_categories(), vec!["Театры"]);
    Ok(())
}
