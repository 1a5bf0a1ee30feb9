//! Reminder e-mail rendering

/// Subject line for reminder e-mails
pub const REMINDER_SUBJECT: &str = "Reminder: Update Your Pending Post-Evaluation Form";

/// Details rendered into the reminder body
#[derive(Debug, Clone)]
pub struct ReminderContext<'a> {
    /// Name the greeting addresses
    pub user_name: &'a str,

    /// Customer on the related record, or "N/A"
    pub customer_name: &'a str,

    /// Project on the related record, or "N/A"
    pub project_name: &'a str,

    /// Deep link to the pending form
    pub form_link: &'a str,

    /// Sender display name shown in the signature
    pub system_name: &'a str,
}

/// Render the reminder e-mail body as an HTML document
pub fn render_reminder(ctx: &ReminderContext<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: #007bff; color: white; padding: 20px; text-align: center; border-radius: 5px 5px 0 0; }}
        .content {{ background: #f9f9f9; padding: 30px; border: 1px solid #ddd; }}
        .button {{ display: inline-block; padding: 12px 30px; background: #007bff; color: white; text-decoration: none; border-radius: 5px; margin: 20px 0; }}
        .footer {{ text-align: center; padding: 20px; color: #666; font-size: 12px; }}
        .info-box {{ background: white; padding: 15px; border-left: 4px solid #007bff; margin: 20px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h2>Post-Evaluation Form Reminder</h2>
        </div>
        <div class="content">
            <p>Hello {user_name},</p>

            <p>This is an automated reminder about your pending post-evaluation form.</p>

            <div class="info-box">
                <strong>Form Details:</strong><br>
                Customer: {customer_name}<br>
                Project: {project_name}<br>
                Status: Pending (set 2 weeks ago)
            </div>

            <p>It has been 14 days since this form was marked as pending. Please update it with the final evaluation result and complete the required information.</p>

            <center>
                <a href="{form_link}" class="button">Update Form Now</a>
            </center>

            <p>You can open the form directly with the link above, or log in and navigate to your pending forms.</p>

            <p>Best regards,<br>
            <strong>{system_name}</strong></p>
        </div>
        <div class="footer">
            <p>This is an automated e-mail. Please do not reply to this message.</p>
        </div>
    </div>
</body>
</html>
"#,
        user_name = ctx.user_name,
        customer_name = ctx.customer_name,
        project_name = ctx.project_name,
        form_link = ctx.form_link,
        system_name = ctx.system_name,
    )
}
