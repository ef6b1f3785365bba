//! Uploading and editing cloudcasts.
//!
//! Both operations take [`UploadOptions`], validated before anything is
//! sent: descriptions are limited to 1000 characters, uploads to 5 tags,
//! pictures to 10 MiB and mp3 files to 4 GiB.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::{Section, UploadOptions};
//!
//! let options = UploadOptions::new()
//!     .description("Two hours of deep house")
//!     .tag("house")
//!     .tag("deep house")
//!     .section(Section::track("Artist", "Song", 0))
//!     .picture("cover.jpg");
//!
//! let result = mixcloud.upload("mix.mp3", "Friday mix", &options).await?;
//! mixcloud.edit("friday-mix", Some("Friday night mix"), &UploadOptions::new()).await?;
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::clients::api::Mixcloud;
use crate::clients::{FormPart, HttpMethod, HttpRequest, RequestBody};
use crate::config::{DESCRIPTION_MAX_SIZE, MP3_MAX_SIZE, PICTURE_MAX_SIZE, TAG_MAX_COUNT};
use crate::rest::{
    build_path, format_datetime, key_path, AccessDict, Endpoint, MixcloudError, Timestamp,
};

/// A section of a cloudcast's tracklist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Section {
    /// A track by an artist.
    Track {
        /// Artist name.
        artist: String,
        /// Song title.
        song: String,
        /// Start time, in seconds.
        start_time: u32,
    },
    /// A named chapter.
    Chapter {
        /// Chapter title.
        chapter: String,
        /// Start time, in seconds.
        start_time: u32,
    },
}

impl Section {
    /// Creates a track section.
    #[must_use]
    pub fn track(artist: impl Into<String>, song: impl Into<String>, start_time: u32) -> Self {
        Self::Track {
            artist: artist.into(),
            song: song.into(),
            start_time,
        }
    }

    /// Creates a chapter section.
    #[must_use]
    pub fn chapter(chapter: impl Into<String>, start_time: u32) -> Self {
        Self::Chapter {
            chapter: chapter.into(),
            start_time,
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Track {
                artist,
                song,
                start_time,
            } => vec![
                ("artist", artist.clone()),
                ("song", song.clone()),
                ("start_time", start_time.to_string()),
            ],
            Self::Chapter {
                chapter,
                start_time,
            } => vec![
                ("chapter", chapter.clone()),
                ("start_time", start_time.to_string()),
            ],
        }
    }
}

/// Optional information about an upload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadOptions {
    picture: Option<PathBuf>,
    description: Option<String>,
    tags: Vec<String>,
    sections: Vec<Section>,
    publish_date: Option<Timestamp>,
    disable_comments: bool,
    hide_stats: bool,
    unlisted: bool,
}

impl UploadOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a picture file.
    #[must_use]
    pub fn picture(mut self, path: impl Into<PathBuf>) -> Self {
        self.picture = Some(path.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a tracklist section.
    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Schedules publication.
    #[must_use]
    pub fn publish_date(mut self, date: impl Into<Timestamp>) -> Self {
        self.publish_date = Some(date.into());
        self
    }

    /// Disables comments.
    #[must_use]
    pub const fn disable_comments(mut self, disable: bool) -> Self {
        self.disable_comments = disable;
        self
    }

    /// Hides play statistics.
    #[must_use]
    pub const fn hide_stats(mut self, hide: bool) -> Self {
        self.hide_stats = hide;
        self
    }

    /// Makes the upload unlisted.
    #[must_use]
    pub const fn unlisted(mut self, unlisted: bool) -> Self {
        self.unlisted = unlisted;
        self
    }

    /// Returns the attached picture, if any.
    #[must_use]
    pub fn picture_path(&self) -> Option<&Path> {
        self.picture.as_deref()
    }

    /// Checks the limits that do not need the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for an oversized description,
    /// too many tags or an unparseable publish date.
    pub fn validate(&self) -> Result<(), MixcloudError> {
        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_SIZE {
                return Err(MixcloudError::bad_argument(format!(
                    "description size must be {DESCRIPTION_MAX_SIZE} characters at most"
                )));
            }
        }
        if self.tags.len() > TAG_MAX_COUNT {
            return Err(MixcloudError::bad_argument(format!(
                "an upload must have {TAG_MAX_COUNT} tags at most"
            )));
        }
        if let Some(date) = &self.publish_date {
            date.to_datetime()?;
        }
        Ok(())
    }

    /// Returns the text fields to send, in order.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for an unparseable publish date.
    pub fn form_fields(&self) -> Result<Vec<(String, String)>, MixcloudError> {
        let mut fields = Vec::new();

        if let Some(description) = &self.description {
            fields.push(("description".to_string(), description.clone()));
        }
        if let Some(date) = &self.publish_date {
            fields.push(("publish_date".to_string(), format_datetime(&date.to_datetime()?)));
        }
        for (flag, set) in [
            ("disable_comments", self.disable_comments),
            ("hide_stats", self.hide_stats),
            ("unlisted", self.unlisted),
        ] {
            if set {
                fields.push((flag.to_string(), "1".to_string()));
            }
        }
        for (i, tag) in self.tags.iter().enumerate() {
            fields.push((format!("tags-{i}-tag"), tag.clone()));
        }
        for (i, section) in self.sections.iter().enumerate() {
            for (name, value) in section.fields() {
                fields.push((format!("sections-{i}-{name}"), value));
            }
        }

        Ok(fields)
    }

    /// Validates the options, including the picture size.
    async fn check(&self) -> Result<(), MixcloudError> {
        self.validate()?;
        if let Some(picture) = &self.picture {
            check_file_size(picture, PICTURE_MAX_SIZE, "picture").await?;
        }
        Ok(())
    }
}

async fn check_file_size(path: &Path, max: u64, what: &str) -> Result<(), MixcloudError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > max {
        return Err(MixcloudError::bad_argument(format!(
            "{what} file size must be {max} bytes at most"
        )));
    }
    Ok(())
}

impl Mixcloud {
    /// Uploads the mp3 file at `mp3` as a new cloudcast named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token, or
    /// [`MixcloudError::BadArgument`] for invalid options or oversized
    /// files. Both are detected before any request is made.
    pub async fn upload(
        &self,
        mp3: impl AsRef<Path>,
        name: &str,
        options: &UploadOptions,
    ) -> Result<AccessDict, MixcloudError> {
        let token = self.require_token()?;
        let mp3 = mp3.as_ref();
        options.check().await?;
        check_file_size(mp3, MP3_MAX_SIZE, "mp3").await?;

        let mut parts = vec![
            FormPart::Text {
                name: "name".to_string(),
                value: name.to_string(),
            },
            FormPart::File {
                name: "mp3".to_string(),
                path: mp3.to_path_buf(),
            },
        ];
        parts.extend(multipart_fields(options)?);

        tracing::debug!(name = %name, mp3 = %mp3.display(), "Uploading cloudcast");

        let url = self.config().api_root().join(Endpoint::Upload.template());
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .query_param("access_token", token.as_ref())
            .body(RequestBody::Multipart(parts))
            .build()?;
        let response = self.send(request, Endpoint::Upload.template()).await?;
        self.native_result(response.body)
    }

    /// Edits the upload identified by `key`, optionally renaming it.
    ///
    /// A `key` without a `/` names a cloudcast of the authorized user, whose
    /// key is fetched first.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token, or
    /// [`MixcloudError::BadArgument`] for invalid options. Both are detected
    /// before any request is made.
    pub async fn edit(
        &self,
        key: &str,
        name: Option<&str>,
        options: &UploadOptions,
    ) -> Result<AccessDict, MixcloudError> {
        let token = self.require_token()?;
        options.check().await?;

        let key = if key.contains('/') {
            key_path(key)
        } else {
            let me = self.me().await?;
            format!("{}{}/", key_path(me.key()), key)
        };
        let ids = HashMap::from([("key", key.as_str())]);
        let path = build_path(Endpoint::Edit.template(), &ids);

        let mut fields = Vec::new();
        if let Some(name) = name {
            fields.push(("name".to_string(), name.to_string()));
        }

        let body = if options.picture.is_some() {
            let mut parts: Vec<FormPart> = fields
                .into_iter()
                .map(|(name, value)| FormPart::Text { name, value })
                .collect();
            parts.extend(multipart_fields(options)?);
            RequestBody::Multipart(parts)
        } else {
            fields.extend(options.form_fields()?);
            RequestBody::Form(fields)
        };

        tracing::debug!(key = %key, "Editing upload");

        let url = self.config().api_root().join(&path);
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .query_param("access_token", token.as_ref())
            .body(body)
            .build()?;
        let response = self.send(request, &key).await?;
        self.native_result(response.body)
    }
}

/// The picture, if any, followed by the text fields of `options`.
fn multipart_fields(options: &UploadOptions) -> Result<Vec<FormPart>, MixcloudError> {
    let mut parts = Vec::new();
    if let Some(picture) = &options.picture {
        parts.push(FormPart::File {
            name: "picture".to_string(),
            path: picture.clone(),
        });
    }
    parts.extend(
        options
            .form_fields()?
            .into_iter()
            .map(|(name, value)| FormPart::Text { name, value }),
    );
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_form_fields_encoding() {
        let options = UploadOptions::new()
            .description("Deep house")
            .tags(["house", "deep"])
            .section(Section::track("Artist", "Song", 0))
            .section(Section::chapter("Intro", 90))
            .publish_date(Utc.with_ymd_and_hms(2019, 3, 4, 20, 23, 17).unwrap())
            .unlisted(true);

        let fields = options.form_fields().unwrap();
        let fields: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(
            fields,
            vec![
                ("description", "Deep house"),
                ("publish_date", "2019-03-04T20:23:17Z"),
                ("unlisted", "1"),
                ("tags-0-tag", "house"),
                ("tags-1-tag", "deep"),
                ("sections-0-artist", "Artist"),
                ("sections-0-song", "Song"),
                ("sections-0-start_time", "0"),
                ("sections-1-chapter", "Intro"),
                ("sections-1-start_time", "90"),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_long_description() {
        let options = UploadOptions::new().description("x".repeat(DESCRIPTION_MAX_SIZE + 1));
        assert!(matches!(
            options.validate(),
            Err(MixcloudError::BadArgument { .. })
        ));

        let options = UploadOptions::new().description("é".repeat(DESCRIPTION_MAX_SIZE));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_too_many_tags() {
        let options = UploadOptions::new().tags(["a", "b", "c", "d", "e", "f"]);
        assert!(matches!(
            options.validate(),
            Err(MixcloudError::BadArgument { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_publish_date() {
        let options = UploadOptions::new().publish_date("not a date");
        assert!(matches!(
            options.validate(),
            Err(MixcloudError::BadArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_check_rejects_oversized_picture() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(PICTURE_MAX_SIZE + 1).unwrap();

        let options = UploadOptions::new().picture(file.path());
        assert!(matches!(
            options.check().await,
            Err(MixcloudError::BadArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_check_reports_missing_picture() {
        let options = UploadOptions::new().picture("/definitely/not/here.jpg");
        assert!(matches!(options.check().await, Err(MixcloudError::Io(_))));
    }

    #[test]
    fn test_multipart_fields_put_picture_first() {
        let options = UploadOptions::new().picture("cover.jpg").tag("house");
        let parts = multipart_fields(&options).unwrap();
        assert_eq!(parts[0].name(), "picture");
        assert_eq!(parts[1].name(), "tags-0-tag");
    }
}
