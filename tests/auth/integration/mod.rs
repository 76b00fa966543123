mod test_auth_middleware;
mod test_user_management;
