pub mod command_handler;
pub mod submission_repository;
pub mod submission_service;
