mod test_height_query_basic;
