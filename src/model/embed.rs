use serenity::all::{CreateEmbed, CreateEmbedFooter};

/// Announcement embed content, independent of the Discord builder types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementEmbed {
    pub title: String,
    pub url: String,
    pub description: String,
    pub image_url: Option<String>,
    pub color: u32,
}

impl AnnouncementEmbed {
    pub fn to_create_embed(&self) -> CreateEmbed {
        let embed = CreateEmbed::new()
            .title(&self.title)
            .url(&self.url)
            .description(&self.description)
            .color(self.color);

        match &self.image_url {
            Some(image_url) => embed.image(image_url),
            None => embed,
        }
    }
}

/// Running tallies of a fan-out batch rendered as a progress embed.
pub fn progress_embed(title: &str, fields: &[(&str, String)], footer: &str) -> CreateEmbed {
    fields
        .iter()
        .fold(CreateEmbed::new().title(title).color(0xA96ECA), |embed, (name, value)| {
            embed.field(*name, value, false)
        })
        .footer(CreateEmbedFooter::new(footer))
}
