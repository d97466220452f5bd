//! Scenario tests for the music crate

#[cfg(test)]
mod support {
    use std::sync::Mutex;
    use std::time::Duration;

    use auth::Claims;
    use chrono::Utc;
    use kernel::id::{AlbumId, UserId};
    use uuid::Uuid;

    use crate::application::MusicConfig;
    use crate::domain::album::{Album, NewAlbum};
    use crate::domain::repository::MusicRepository;
    use crate::domain::storage::UploadPresigner;
    use crate::domain::track::{NewTrack, Track};
    use crate::error::{MusicError, MusicResult};
    use crate::presentation::MusicAppState;

    pub const CDN: &str = "https://cdn.example.com";

    #[derive(Default)]
    pub struct InMemoryMusic {
        pub albums: Mutex<Vec<Album>>,
        pub tracks: Mutex<Vec<Track>>,
    }

    impl MusicRepository for InMemoryMusic {
        async fn insert_album(&self, album: NewAlbum) -> MusicResult<Album> {
            let album = album.into_album(Utc::now());
            self.albums.lock().unwrap().push(album.clone());
            Ok(album)
        }

        async fn album_owner(&self, album_id: &AlbumId) -> MusicResult<Option<UserId>> {
            Ok(self
                .albums
                .lock()
                .unwrap()
                .iter()
                .find(|a| &a.album_id == album_id)
                .map(|a| a.user_id))
        }

        async fn insert_track(&self, track: NewTrack) -> MusicResult<Track> {
            let track = track.into_track(Utc::now());
            self.tracks.lock().unwrap().push(track.clone());
            Ok(track)
        }
    }

    /// Records what it was asked to sign
    #[derive(Default)]
    pub struct FakePresigner {
        pub calls: Mutex<Vec<(String, String, Duration)>>,
        pub fail: bool,
    }

    impl UploadPresigner for FakePresigner {
        async fn presign_put(
            &self,
            key: &str,
            content_type: &str,
            expires_in: Duration,
        ) -> MusicResult<String> {
            if self.fail {
                return Err(MusicError::Presign("storage offline".into()));
            }
            self.calls
                .lock()
                .unwrap()
                .push((key.to_owned(), content_type.to_owned(), expires_in));
            Ok(format!("https://bucket.s3.example.com/{key}?X-Amz-Signature=abc"))
        }
    }

    pub fn state() -> MusicAppState<InMemoryMusic, FakePresigner> {
        MusicAppState::new(
            InMemoryMusic::default(),
            FakePresigner::default(),
            MusicConfig::new(CDN),
        )
    }

    pub fn claims() -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: Uuid::new_v4(),
            email: "artist@example.com".into(),
            iat: now,
            exp: now + 3600,
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::time::Duration;

    use super::support::*;
    use crate::application::{
        CreateAlbumInput, CreateAlbumUseCase, MusicConfig, PresignTrackUploadUseCase,
        SaveTrackInput, SaveTrackUseCase,
    };
    use crate::domain::track::owner_key_prefix;
    use crate::error::MusicError;
    use crate::presentation::MusicAppState;

    fn own_key(claims: &auth::Claims, name: &str) -> String {
        format!("{}{name}", owner_key_prefix(&claims.user_id()))
    }

    fn track_input(key: &str) -> SaveTrackInput {
        SaveTrackInput {
            album_id: None,
            title: "Intro".into(),
            artist: "Nina".into(),
            genre: "ambient".into(),
            format: "mp3".into(),
            key: key.into(),
            duration_secs: 184,
            file_size: 4_200_000,
        }
    }

    #[tokio::test]
    async fn test_presign_requires_identity() {
        let state = state();
        let result = PresignTrackUploadUseCase::new(state.presigner.clone(), state.config.clone())
            .execute(None, "song.mp3", "audio/mpeg")
            .await;

        assert!(matches!(result, Err(MusicError::Unauthorized)));
        assert!(state.presigner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_presign_builds_key_and_ttl() {
        let state = state();
        let claims = claims();
        let output = PresignTrackUploadUseCase::new(state.presigner.clone(), state.config.clone())
            .execute(Some(&claims), "song.mp3", "audio/mpeg")
            .await
            .unwrap();

        assert!(output.key.starts_with(&format!("tracks/{}/", claims.sub)));
        assert!(output.key.ends_with("-song.mp3"));
        assert_eq!(output.expires_in_secs, 15 * 60);
        assert!(output.upload_url.contains(&output.key));

        let calls = state.presigner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "audio/mpeg");
        assert_eq!(calls[0].2, Duration::from_secs(900));
    }

    #[tokio::test]
    async fn test_presign_validation() {
        let state = state();
        let claims = claims();
        let use_case =
            PresignTrackUploadUseCase::new(state.presigner.clone(), state.config.clone());

        for (filename, content_type, field) in [
            ("", "audio/mpeg", "filename"),
            ("../etc/passwd", "audio/mpeg", "filename"),
            ("song.mp3", " ", "content_type"),
        ] {
            match use_case.execute(Some(&claims), filename, content_type).await {
                Err(MusicError::Validation { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_presign_storage_failure() {
        let state = MusicAppState::new(
            InMemoryMusic::default(),
            FakePresigner {
                fail: true,
                ..Default::default()
            },
            MusicConfig::new(CDN),
        );
        let claims = claims();

        let result = PresignTrackUploadUseCase::new(state.presigner.clone(), state.config.clone())
            .execute(Some(&claims), "song.mp3", "audio/mpeg")
            .await;
        assert!(matches!(result, Err(MusicError::Presign(_))));
    }

    #[tokio::test]
    async fn test_save_track_owned_by_caller() {
        let state = state();
        let claims = claims();

        let key = own_key(&claims, "1-song.mp3");

        let track = SaveTrackUseCase::new(state.repo.clone(), state.config.clone())
            .execute(Some(&claims), track_input(&key))
            .await
            .unwrap();

        assert_eq!(track.user_id, claims.user_id());
        assert_eq!(track.cdn_url, format!("{CDN}/{key}"));
        assert_eq!(state.repo.tracks.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_track_anonymous() {
        let state = state();
        let result = SaveTrackUseCase::new(state.repo.clone(), state.config.clone())
            .execute(None, track_input("tracks/1-song.mp3"))
            .await;

        assert!(matches!(result, Err(MusicError::Unauthorized)));
        assert!(state.repo.tracks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_track_rejects_foreign_key() {
        let state = state();
        let claims = claims();
        let use_case = SaveTrackUseCase::new(state.repo.clone(), state.config.clone());

        let bare_prefix = own_key(&claims, "");
        for key in ["avatars/me.png", "tracks/", "tracks/1-song.mp3", "", bare_prefix.as_str()] {
            let result = use_case.execute(Some(&claims), track_input(key)).await;
            assert!(
                matches!(result, Err(MusicError::Validation { field: "key", .. })),
                "{key:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_save_track_cannot_claim_another_users_upload() {
        let state = state();
        let uploader = claims();
        let other = claims();

        let presigned =
            PresignTrackUploadUseCase::new(state.presigner.clone(), state.config.clone())
                .execute(Some(&uploader), "song.mp3", "audio/mpeg")
                .await
                .unwrap();

        let use_case = SaveTrackUseCase::new(state.repo.clone(), state.config.clone());

        let stolen = use_case
            .execute(Some(&other), track_input(&presigned.key))
            .await;
        assert!(matches!(
            stolen,
            Err(MusicError::Validation { field: "key", .. })
        ));
        assert!(state.repo.tracks.lock().unwrap().is_empty());

        let saved = use_case
            .execute(Some(&uploader), track_input(&presigned.key))
            .await
            .unwrap();
        assert_eq!(saved.user_id, uploader.user_id());
    }

    #[tokio::test]
    async fn test_save_track_into_someone_elses_album() {
        let state = state();
        let owner = claims();
        let intruder = claims();

        let album = CreateAlbumUseCase::new(state.repo.clone())
            .execute(
                Some(&owner),
                CreateAlbumInput {
                    title: "First".into(),
                    artist: "Nina".into(),
                    release_year: Some(2024),
                },
            )
            .await
            .unwrap();

        let use_case = SaveTrackUseCase::new(state.repo.clone(), state.config.clone());
        let mut denied_input = track_input(&own_key(&intruder, "1-song.mp3"));
        denied_input.album_id = Some(album.album_id.into_uuid());

        let denied = use_case.execute(Some(&intruder), denied_input).await;
        assert!(matches!(denied, Err(MusicError::AlbumNotFound)));

        let mut input = track_input(&own_key(&owner, "1-song.mp3"));
        input.album_id = Some(album.album_id.into_uuid());

        let saved = use_case.execute(Some(&owner), input).await.unwrap();
        assert_eq!(saved.album_id, Some(album.album_id));
    }

    #[tokio::test]
    async fn test_create_album_validation() {
        let state = state();
        let claims = claims();
        let use_case = CreateAlbumUseCase::new(state.repo.clone());

        let anonymous = use_case
            .execute(
                None,
                CreateAlbumInput {
                    title: "t".into(),
                    artist: "a".into(),
                    release_year: None,
                },
            )
            .await;
        assert!(matches!(anonymous, Err(MusicError::Unauthorized)));

        let bad_year = use_case
            .execute(
                Some(&claims),
                CreateAlbumInput {
                    title: "t".into(),
                    artist: "a".into(),
                    release_year: Some(99),
                },
            )
            .await;
        assert!(matches!(
            bad_year,
            Err(MusicError::Validation { field: "release_year", .. })
        ));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use auth::{IdentityState, SigningSecret, TokenCodec, attach_identity};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::extract::Request;
    use axum::http::{StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::presentation::music_router;

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(
            SigningSecret::new(b"music-test-secret".to_vec()).unwrap(),
            Duration::from_secs(3600),
        ))
    }

    fn app(tokens: Arc<TokenCodec>) -> Router {
        let identity = IdentityState {
            tokens,
            cookie_name: Arc::from("auth_token"),
        };
        Router::new()
            .nest("/api/music", music_router(state()))
            .layer(from_fn_with_state(identity, attach_identity))
    }

    fn post(uri: &str, body: Value, cookie: Option<String>) -> Request {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_upload_is_unauthorized() {
        let resp = app(codec())
            .oneshot(post(
                "/api/music/uploads/track",
                json!({ "filename": "song.mp3", "contentType": "audio/mpeg" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_anonymous() {
        let foreign = TokenCodec::new(
            SigningSecret::new(b"someone-else".to_vec()).unwrap(),
            Duration::from_secs(3600),
        );
        let cookie = format!("auth_token={}", foreign.issue(UserId::new(), "x@example.com"));

        let resp = app(codec())
            .oneshot(post(
                "/api/music/albums",
                json!({ "title": "t", "artist": "a" }),
                Some(cookie),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signed_in_flow() {
        let tokens = codec();
        let app = app(tokens.clone());
        let cookie = format!("auth_token={}", tokens.issue(UserId::new(), "a@example.com"));

        let resp = app
            .clone()
            .oneshot(post(
                "/api/music/uploads/track",
                json!({ "filename": "song.mp3", "contentType": "audio/mpeg" }),
                Some(cookie.clone()),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let presigned: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(presigned["expiresIn"], 900);
        let key = presigned["key"].as_str().unwrap().to_owned();

        let resp = app
            .oneshot(post(
                "/api/music/tracks",
                json!({
                    "title": "Intro",
                    "artist": "Nina",
                    "genre": "ambient",
                    "format": "mp3",
                    "key": key,
                    "duration": 184,
                    "fileSize": 4200000
                }),
                Some(cookie),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let track: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(track["cdnUrl"], format!("{CDN}/{key}"));
    }
}
