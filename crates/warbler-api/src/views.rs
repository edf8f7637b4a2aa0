use warbler_types::models;

pub(crate) fn user(row: &warbler_db::User) -> models::User {
    models::User {
        id: row.id,
        username: row.username.clone(),
        email: row.email.clone(),
        image_url: row.image_url.clone(),
        header_image_url: row.header_image_url.clone(),
        bio: row.bio.clone(),
        location: row.location.clone(),
    }
}

pub(crate) fn users(rows: &[warbler_db::User]) -> Vec<models::User> {
    rows.iter().map(user).collect()
}

pub(crate) fn message(row: &warbler_db::Message) -> models::Message {
    models::Message {
        id: row.id,
        text: row.text.clone(),
        timestamp: row.timestamp,
        user_id: row.user_id,
    }
}

pub(crate) fn messages(rows: &[warbler_db::Message]) -> Vec<models::Message> {
    rows.iter().map(message).collect()
}
