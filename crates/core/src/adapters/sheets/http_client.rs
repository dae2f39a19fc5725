use google_sheets4::{hyper, hyper_rustls};

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

/// HTTPS client shared by the authenticator and the Sheets hub.
pub fn http_client() -> hyper::Client<HttpsConnector> {
    hyper::Client::builder().build(
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .expect("could not load platform certs")
            .https_or_http()
            .enable_http1()
            .build(),
    )
}
