//! Studio flows: generation selection, uploads and submission state.

mod common;

use image::{DynamicImage, ImageFormat, RgbImage};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::sync::Arc;

use common::{GatedTransport, MockTransport, RecordingSleep, predictions, studio, submission_client};
use flyerforge::design::TextField;
use flyerforge::drag::PointerEvent;
use flyerforge::error::FlyerError;
use flyerforge::generate::GenerationClient;
use flyerforge::layout::{ElementId, Face, Position};
use flyerforge::media::ImageData;
use flyerforge::session::{BackgroundSource, Command};
use flyerforge::studio::Studio;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_selected_generated_image_is_background() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    transport.reply(200, predictions(4));
    let studio = studio(&transport, &sleeper);

    assert_eq!(studio.generate_backgrounds().await.unwrap(), 4);
    assert_eq!(
        studio.session().await.background(),
        &BackgroundSource::Generated {
            index: 0,
            image: ImageData::from_png_base64("IMG0")
        }
    );

    for index in 0..4 {
        studio.apply(Command::SelectGenerated(index)).await.unwrap();
        let session = studio.session().await;
        let expected = ImageData::from_png_base64(&format!("IMG{}", index));
        assert_eq!(session.background().image(), Some(&expected));
        assert_eq!(session.flyer_data().background_image, Some(expected));
    }
}

#[tokio::test]
async fn test_failed_generation_sets_banner() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    transport.reply(403, serde_json::json!({"error": {"message": "Permission denied"}}));
    let studio = studio(&transport, &sleeper);

    assert!(studio.generate_backgrounds().await.is_err());
    let session = studio.session().await;
    assert_eq!(session.error(), Some("Permission denied"));
    assert!(!session.is_generating());
    assert!(session.background().is_default());
}

#[tokio::test]
async fn test_background_upload_is_normalized() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    let studio = studio(&transport, &sleeper);

    let stored = studio
        .upload_background("image/png".to_string(), png_bytes(800, 600))
        .await
        .unwrap();
    assert!(stored);

    let session = studio.session().await;
    let image = session.uploaded_background().unwrap();
    let decoded = image::load_from_memory(&image.decode().unwrap()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 400));
    assert_eq!(image.media_type(), Some("image/png"));
    assert!(matches!(session.background(), BackgroundSource::Uploaded { .. }));
}

#[tokio::test]
async fn test_non_image_uploads_are_ignored() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    let studio = studio(&transport, &sleeper);

    assert!(!studio.upload_logo("text/plain", b"hello").await.unwrap());
    assert!(
        !studio
            .upload_background("application/pdf".to_string(), b"%PDF".to_vec())
            .await
            .unwrap()
    );

    let session = studio.session().await;
    assert!(session.design().uploaded_logo.is_none());
    assert!(session.background().is_default());
}

#[tokio::test]
async fn test_ignored_upload_does_not_supersede_upload_in_flight() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    let studio = studio(&transport, &sleeper);

    // The valid upload takes its ticket on first poll, then waits on the
    // blocking pool while the text upload runs to completion.
    let (valid, ignored) = tokio::join!(
        studio.upload_background("image/png".to_string(), png_bytes(1200, 900)),
        studio.upload_background("text/plain".to_string(), b"notes".to_vec()),
    );

    assert!(!ignored.unwrap());
    assert!(valid.unwrap());
    let session = studio.session().await;
    assert!(matches!(session.background(), BackgroundSource::Uploaded { .. }));
}

#[tokio::test]
async fn test_ignored_logo_keeps_previous_logo() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    let studio = studio(&transport, &sleeper);

    assert!(studio.upload_logo("image/png", b"logo").await.unwrap());
    assert!(!studio.upload_logo("application/zip", b"PK").await.unwrap());
    assert_eq!(
        studio.session().await.design().uploaded_logo,
        Some(ImageData::from_bytes("image/png", b"logo"))
    );
}

#[tokio::test]
async fn test_edits_flow_while_generation_is_in_flight() {
    let transport = MockTransport::new();
    transport.reply(200, predictions(4));
    let gate = GatedTransport::new(transport.clone());
    let studio = Arc::new(Studio::new(
        GenerationClient::new(gate.clone(), RecordingSleep::new(), common::GENERATE_URL),
        submission_client(&transport),
    ));

    let generation = tokio::spawn({
        let studio = studio.clone();
        async move { studio.generate_backgrounds().await }
    });
    gate.wait_for_request().await;

    for event in [
        PointerEvent::Down { target: ElementId::HeaderTop, x: 30, y: 30 },
        PointerEvent::Move { x: 80, y: 130 },
        PointerEvent::Up { x: 80, y: 130 },
    ] {
        studio.apply(Command::Pointer(Face::Front, event)).await.unwrap();
    }
    studio
        .apply(Command::SetText(TextField::Title, "Live".to_string()))
        .await
        .unwrap();

    {
        let session = studio.session().await;
        assert_eq!(session.positions().get(ElementId::HeaderTop), Position::new(70, 124));
        assert_eq!(session.design().title, "Live");
        assert!(session.is_generating());
    }
    let err = studio.generate_backgrounds().await.unwrap_err();
    assert!(err.to_string().contains("in progress"));

    gate.release();
    assert_eq!(generation.await.unwrap().unwrap(), 4);
    let session = studio.session().await;
    assert!(!session.is_generating());
    assert_eq!(session.generated().len(), 4);
    assert_eq!(session.positions().get(ElementId::HeaderTop), Position::new(70, 124));
}

#[tokio::test]
async fn test_undecodable_background_reports_error() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    let studio = studio(&transport, &sleeper);

    let err = studio
        .upload_background("image/png".to_string(), b"not a png".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, FlyerError::Image(_)));
    assert!(studio.session().await.error().is_some());
}

#[tokio::test]
async fn test_logo_is_stored_unmodified() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    let studio = studio(&transport, &sleeper);

    assert!(studio.upload_logo("image/svg+xml", b"<svg/>").await.unwrap());
    let session = studio.session().await;
    let logo = session.design().uploaded_logo.as_ref().unwrap();
    assert_eq!(logo.decode().unwrap(), b"<svg/>".to_vec());
    assert!(session.render_face(flyerforge::layout::Face::Front).contains(logo.as_str()));
}

#[tokio::test]
async fn test_email_clears_address_on_success() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    transport.reply(200, serde_json::json!({"ok": true}));
    let studio = studio(&transport, &sleeper);

    studio
        .apply(Command::SetEmailAddress("team@example.com".to_string()))
        .await
        .unwrap();
    studio.send_email().await.unwrap();

    let session = studio.session().await;
    assert_eq!(session.email_address(), "");
    assert!(session.email_success_visible(std::time::Instant::now()));
    assert!(!session.is_sending_email());
}

#[tokio::test]
async fn test_save_failure_sets_banner() {
    let transport = MockTransport::new();
    let sleeper = RecordingSleep::new();
    transport.reply(500, serde_json::json!({"message": "Database down"}));
    let studio = studio(&transport, &sleeper);

    assert!(studio.save_design().await.is_err());
    let session = studio.session().await;
    assert_eq!(session.error(), Some("Database down"));
    assert!(!session.is_saving());
}
