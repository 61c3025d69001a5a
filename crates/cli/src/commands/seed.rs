//! Demo data seeding for receipt testing.
//!
//! Creates a session with placeholder photo records and a priced order, then
//! prints the print-view URLs so the receipt layout can be checked on a real
//! printer without going through a phone upload.

use chrono::Utc;

use photo_kiosk_core::{OrderNumber, OrderStatus, PhotoId};
use photo_kiosk_server::db::{
    self, OrderRepository, PhotoRepository, SessionRepository, SettingsRepository,
};
use photo_kiosk_server::models::{Order, Photo};

use super::{CommandError, database_url};

/// Size recorded for placeholder photo rows (1 MB).
const PLACEHOLDER_SIZE_BYTES: i64 = 1_024_000;

/// Create a demo session with `photo_count` placeholder photos and an order.
pub async fn run(photo_count: u32) -> Result<(), CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let now = Utc::now();
    let settings = SettingsRepository::new(&pool).ensure(now).await?;

    let session = SessionRepository::new(&pool).create(now).await?;
    tracing::info!(session_id = %session.session_id, "created demo session");

    let photo_repo = PhotoRepository::new(&pool);
    let mut photo_ids = Vec::with_capacity(photo_count as usize);
    for i in 1..=photo_count {
        let photo = Photo {
            photo_id: PhotoId::generate(),
            session_id: session.session_id.clone(),
            file_key: format!("demo-photo-{i}.jpg"),
            file_name: format!("demo-photo-{i}.jpg"),
            mime_type: "image/jpeg".to_owned(),
            size_bytes: PLACEHOLDER_SIZE_BYTES,
            created_at: now,
        };
        photo_repo.insert(&photo).await?;
        tracing::info!(file_name = %photo.file_name, "created demo photo");
        photo_ids.push(photo.photo_id);
    }

    let count = i64::from(photo_count);
    let order = Order {
        order_number: OrderNumber::generate(),
        session_id: session.session_id.clone(),
        photo_count: count,
        currency: settings.currency,
        price_per_photo_cents: settings.price_per_photo_cents,
        total_cents: settings.price_per_photo_cents.saturating_mul(count),
        store_name: settings.store_name.clone(),
        receipt_footer: settings.receipt_footer.clone(),
        status: OrderStatus::PendingPrint,
        created_at: now,
        printed_at: None,
    };
    OrderRepository::new(&pool).create(&order, &photo_ids).await?;

    tracing::info!(
        order_number = %order.order_number,
        total = %order.total().display(),
        "created demo order"
    );

    #[allow(clippy::print_stdout)]
    {
        println!("Demo data created.");
        println!("  Session:      {}", session.session_id);
        println!("  Order:        {}", order.order_number);
        println!(
            "  Total:        {} ({} photos)",
            order.total().display(),
            order.photo_count
        );
        println!("  Receipt URL:  /print/{}", order.order_number);
    }

    Ok(())
}
