use anyhow::Result;
use lectern_core::api::auth::{AuthFlow, NavIntent};
use lectern_core::api::ApiClient;
use lectern_core::forms::RegisterForm;
use lectern_core::session::SessionStore;

pub async fn register(
    api: &ApiClient,
    username: String,
    email: String,
    password: String,
) -> Result<()> {
    let mut form = RegisterForm {
        username,
        email,
        password,
    };
    let message = AuthFlow::new(api).register(&mut form).await?;
    println!("{message}");
    println!("You can now sign in with `lectern login`.");
    Ok(())
}

pub async fn login(
    api: &ApiClient,
    store: &mut SessionStore,
    email: &str,
    password: &str,
) -> Result<()> {
    let intent = AuthFlow::new(api).login(store, email, password).await?;
    debug_assert_eq!(intent, NavIntent::Home);
    println!("Signed in as {email}.");
    Ok(())
}

pub fn logout(api: &ApiClient, store: &mut SessionStore) -> Result<()> {
    let intent = AuthFlow::new(api).logout(store)?;
    debug_assert_eq!(intent, NavIntent::Entry);
    println!("Signed out.");
    Ok(())
}
