pub mod serpapi_client;
