mod availability_tests;
