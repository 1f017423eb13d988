use anyhow::{bail, Result};
use lectern_core::api::profile::{ProfileClient, ProfileUpdate};
use lectern_core::api::ApiClient;
use lectern_core::session::SessionStore;
use lectern_types::User;

use super::require_session;

pub async fn show(api: &ApiClient, store: &SessionStore) -> Result<()> {
    let session = require_session(store)?;
    let user = ProfileClient::new(api).whoami(session).await?;
    print_user(&user);
    Ok(())
}

pub async fn update(
    api: &ApiClient,
    store: &SessionStore,
    username: Option<String>,
    email: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let session = require_session(store)?;

    if username.is_none() && email.is_none() && image.is_none() {
        bail!("Nothing to update; pass --username, --email or --image");
    }

    let update = ProfileUpdate {
        username,
        email,
        profile_image: image,
    };
    let user = ProfileClient::new(api)
        .update_profile(session, &update)
        .await?;
    println!("Profile updated.");
    print_user(&user);
    Ok(())
}

fn print_user(user: &User) {
    println!("id:       {}", user.id);
    println!("username: {}", user.username);
    println!("email:    {}", user.email);
    if let Some(image) = &user.profile_image {
        println!("image:    {image}");
    }
}
