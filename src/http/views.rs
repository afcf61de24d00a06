use crate::domain::payment::FieldError;
use tera::{Context, Tera};

pub const PAYMENT_FORM: &str = "payment-form.html";
pub const PAYMENT_ERROR: &str = "payment-error.html";

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (PAYMENT_FORM, include_str!("../../templates/payment-form.html")),
            (PAYMENT_ERROR, include_str!("../../templates/payment-error.html")),
        ])?;
        Ok(Self { tera })
    }

    pub fn payment_form(
        &self,
        amount: Option<&str>,
        idempotency_key: &str,
        errors: &[FieldError],
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("amount", amount.unwrap_or(""));
        ctx.insert("idempotency_key", idempotency_key);
        ctx.insert("errors", errors);
        self.tera.render(PAYMENT_FORM, &ctx)
    }

    pub fn payment_error(&self, code: &str, message: &str) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("code", code);
        ctx.insert("message", message);
        self.tera.render(PAYMENT_ERROR, &ctx)
    }
}
