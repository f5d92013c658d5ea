//! Transactional email via AWS SES
//!
//! The SES client is constructed on first use and cached behind a
//! `OnceCell`, so startup does not depend on AWS connectivity and
//! concurrent first senders cannot double-initialize it. Every send is
//! best-effort from the caller's point of view: handlers log failures and
//! never fail the request over email.

use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use std::sync::Arc;
use tokio::sync::OnceCell;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct EmailSender {
    from: String,
    client: Arc<OnceCell<SesClient>>,
}

impl EmailSender {
    pub fn new(from: String) -> Self {
        Self {
            from,
            client: Arc::new(OnceCell::new()),
        }
    }

    /// Lazily built SES client, honoring an optional SES_REGION override.
    async fn client(&self) -> &SesClient {
        self.client
            .get_or_init(|| async {
                let aws_config =
                    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                if let Ok(region) = std::env::var("SES_REGION") {
                    let ses_config = aws_config
                        .to_builder()
                        .region(aws_config::Region::new(region))
                        .build();
                    SesClient::new(&ses_config)
                } else {
                    SesClient::new(&aws_config)
                }
            })
            .await
    }

    async fn send(&self, to: &str, subject: &str, body_text: String) -> Result<(), BoxError> {
        let subject = Content::builder().data(subject).build()?;
        let body = Body::builder()
            .text(Content::builder().data(body_text).build()?)
            .build();
        let message = Message::builder().subject(subject).body(body).build();

        self.client()
            .await
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;
        Ok(())
    }

    pub async fn send_password_reset_code(&self, to: &str, code: &str) -> Result<(), BoxError> {
        let body = format!(
            "Şifre sıfırlama kodunuz: {code}\n\
             Kod 5 dakika boyunca geçerlidir.\n\n\
             Bu isteği siz yapmadıysanız bu e-postayı yok sayabilirsiniz."
        );
        self.send(to, "Masa — Şifre Sıfırlama", body).await?;
        tracing::info!(to = to, "Password reset code sent");
        Ok(())
    }

    pub async fn send_ticket_reply_notice(&self, to: &str, subject: &str) -> Result<(), BoxError> {
        let body = format!(
            "\"{subject}\" başlıklı destek talebinize yanıt verildi.\n\
             Yanıtı panelinizdeki Destek sayfasından görüntüleyebilirsiniz."
        );
        self.send(to, "Masa — Destek Talebiniz Yanıtlandı", body)
            .await?;
        tracing::info!(to = to, "Ticket reply notice sent");
        Ok(())
    }

    pub async fn send_plan_activated(&self, to: &str, plan_name: &str) -> Result<(), BoxError> {
        let body = format!(
            "\"{plan_name}\" planınız etkinleştirildi.\n\
             Masa'yı tercih ettiğiniz için teşekkürler!"
        );
        self.send(to, "Masa — Planınız Etkinleştirildi", body)
            .await?;
        tracing::info!(to = to, plan = plan_name, "Plan activated email sent");
        Ok(())
    }

    pub async fn send_payment_failed(&self, to: &str) -> Result<(), BoxError> {
        let body = "Ödemeniz alınamadı.\n\
             Hizmetinizin askıya alınmaması için lütfen ödeme yönteminizi güncelleyin."
            .to_string();
        self.send(to, "Masa — Ödeme Alınamadı", body).await?;
        tracing::info!(to = to, "Payment failed email sent");
        Ok(())
    }
}
