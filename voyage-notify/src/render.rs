//! Message rendering for booking, contact and payment confirmations.
//!
//! Pure formatting: every function returns an [`EmailMessage`] for a
//! [`Mailer`](crate::Mailer) to deliver.

use voyage_domain::{Booking, ContactSubmission};

use crate::{EmailMessage, SenderProfile};

/// Operator notice for a new booking request.
pub fn booking_operator_notice(
    sender: &SenderProfile,
    booking: &Booking,
    package_title: &str,
) -> EmailMessage {
    let mut body = format!(
        "New booking request for \"{}\".\n\nName: {}\nEmail: {}\n",
        package_title, booking.name, booking.email
    );
    if let Some(phone) = &booking.phone {
        body.push_str(&format!("Phone: {}\n", phone));
    }
    if let Some(message) = &booking.message {
        body.push_str(&format!("\nMessage:\n{}\n", message));
    }
    body.push_str(&format!("\nBooking reference: {}\n", booking.id));

    EmailMessage {
        to: sender.operator_email.clone(),
        from: sender.noreply_email.clone(),
        subject: format!("New booking request - {}", package_title),
        body,
    }
}

/// Auto-reply to the customer who submitted a booking request.
pub fn booking_confirmation(
    sender: &SenderProfile,
    booking: &Booking,
    package_title: &str,
) -> EmailMessage {
    let body = format!(
        "Dear {},\n\n\
         Thank you for your booking request for \"{}\".\n\
         We have received your inquiry and will contact you shortly.\n\n\
         Booking reference: {}\n\n\
         Best regards,\n{} Team\n",
        booking.name, package_title, booking.id, sender.site_name
    );

    EmailMessage {
        to: booking.email.clone(),
        from: sender.noreply_email.clone(),
        subject: format!("Booking Confirmation - {}", package_title),
        body,
    }
}

/// Receipt sent once the provider confirms payment.
pub fn payment_receipt(
    sender: &SenderProfile,
    booking: &Booking,
    package_title: &str,
) -> EmailMessage {
    let amount_line = match &booking.amount {
        Some(amount) => format!("Amount paid: {}\n", amount),
        None => String::new(),
    };
    let body = format!(
        "Dear {},\n\n\
         Your payment for \"{}\" has been received.\n\
         {}\
         Booking reference: {}\n\n\
         We look forward to travelling with you.\n\n\
         Best regards,\n{} Team\n",
        booking.name, package_title, amount_line, booking.id, sender.site_name
    );

    EmailMessage {
        to: booking.email.clone(),
        from: sender.noreply_email.clone(),
        subject: format!("Payment received - {}", package_title),
        body,
    }
}

/// Operator notice for a contact form submission.
pub fn contact_operator_notice(
    sender: &SenderProfile,
    submission: &ContactSubmission,
) -> EmailMessage {
    EmailMessage {
        to: sender.operator_email.clone(),
        from: submission.email.clone(),
        subject: format!("New contact form submission from {}", submission.name),
        body: format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}\n",
            submission.name, submission.email, submission.message
        ),
    }
}

/// Auto-reply to the contact form submitter.
pub fn contact_auto_reply(sender: &SenderProfile, submission: &ContactSubmission) -> EmailMessage {
    EmailMessage {
        to: submission.email.clone(),
        from: sender.noreply_email.clone(),
        subject: format!("Thank you for contacting {}", sender.site_name),
        body: format!(
            "Dear {},\n\n\
             Thank you for reaching out to {}!\n\
             We have received your message and will respond within 24-48 hours.\n\n\
             Best regards,\n{} Team\n",
            submission.name, sender.site_name, sender.site_name
        ),
    }
}
